use std::io::stdout;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::PersonArg;

#[derive(Parser)]
#[command(name = "checklist", version, about = "Daily objective checklist for two")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, database and demo content
    Init,
    /// Show today's objectives
    Today {
        #[arg(long)]
        json: bool,
    },
    /// Mark an objective as done
    Check {
        /// Objective label (case-insensitive)
        label: String,
        #[arg(long, value_enum)]
        person: PersonArg,
        /// Mark as not done instead
        #[arg(long)]
        undo: bool,
        /// Also replace the person's note
        #[arg(long)]
        note: Option<String>,
    },
    /// Set a person's note on an objective
    Note {
        label: String,
        #[arg(long, value_enum)]
        person: PersonArg,
        #[arg(long)]
        text: String,
    },
    /// Add an objective to today's list
    Add {
        label: String,
        #[arg(long)]
        emoji: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Remove an objective from today's list
    Remove { label: String },
    /// Add the default objectives missing from today's list
    Defaults,
    /// Delete today's objectives
    Clear,
    /// Show the daily texts
    Content {
        /// Day of the year (defaults to today)
        #[arg(long)]
        day: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Replace the daily texts from a JSON file
    Import { file: std::path::PathBuf },
    /// List recent objectives day by day
    History {
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Completion statistics
    Stats {
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Export history to a file
    Export {
        #[command(subcommand)]
        action: commands::history::ExportAction,
    },
    /// Display settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Delete all objective history
    Reset {
        #[arg(long)]
        yes: bool,
        #[arg(long)]
        confirm: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CHECKLIST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Init => commands::today::init(),
        Commands::Today { json } => commands::today::show(json),
        Commands::Check {
            label,
            person,
            undo,
            note,
        } => commands::objectives::check(&label, person, undo, note.as_deref()),
        Commands::Note { label, person, text } => commands::objectives::note(&label, person, &text),
        Commands::Add {
            label,
            emoji,
            category,
        } => commands::objectives::add(&label, emoji.as_deref(), category.as_deref()),
        Commands::Remove { label } => commands::objectives::remove(&label),
        Commands::Defaults => commands::objectives::defaults(),
        Commands::Clear => commands::objectives::clear(),
        Commands::Content { day, json } => commands::content::show(day, json),
        Commands::Import { file } => commands::content::import(&file),
        Commands::History { days, json } => commands::history::history(days, json),
        Commands::Stats { days, json } => commands::history::stats(days, json),
        Commands::Export { action } => commands::history::export(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Reset { yes, confirm } => commands::reset::run(yes, confirm),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "checklist", &mut stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
