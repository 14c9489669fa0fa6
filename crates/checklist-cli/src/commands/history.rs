use std::path::PathBuf;

use clap::Subcommand;
use checklist_core::export::{csv_file_name, report_file_name};
use checklist_core::Person;

use super::{display_name, open_dashboard, CmdResult};

#[derive(Subcommand)]
pub enum ExportAction {
    /// Every entry of the window as CSV
    Csv {
        #[arg(long)]
        days: Option<u32>,
        /// Output file (defaults to a dated name in the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Markdown summary of the window
    Report {
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub fn history(days: Option<u32>, json: bool) -> CmdResult {
    let dash = open_dashboard()?;
    let days = days.unwrap_or(dash.config().history.default_days);
    let entries = dash.history(days);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("no history in the last {days} days");
        return Ok(());
    }

    let mut current = None;
    for entry in &entries {
        if current != Some(entry.date) {
            current = Some(entry.date);
            println!("{}", entry.date);
        }
        println!(
            "  {}{} {} {}",
            if entry.completed_by_a { "A" } else { "-" },
            if entry.completed_by_b { "B" } else { "-" },
            entry.emoji,
            entry.label
        );
    }
    Ok(())
}

pub fn stats(days: Option<u32>, json: bool) -> CmdResult {
    let dash = open_dashboard()?;
    let days = days.unwrap_or(dash.config().history.default_days);
    let report = dash.report(days);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let config = dash.config();
    let s = &report.summary;
    println!("last {days} days: {} days tracked, {} objectives", s.days, s.entries);
    for person in Person::BOTH {
        let (done, rate) = match person {
            Person::A => (s.a_done, s.a_rate),
            Person::B => (s.b_done, s.b_rate),
        };
        println!(
            "  {}: {done} done ({rate:.1}%), streak {}",
            display_name(config, person),
            report.streaks.get(person)
        );
    }
    if !report.categories.is_empty() {
        println!("by category:");
        for cat in &report.categories {
            println!(
                "  {:<12} {:>5.1}% {:>5.1}%  ({} items)",
                cat.category, cat.a_rate, cat.b_rate, cat.total
            );
        }
    }
    Ok(())
}

pub fn export(action: ExportAction) -> CmdResult {
    let dash = open_dashboard()?;
    let date = dash.today().date;
    let export_days = dash.config().history.export_days;

    let (path, body) = match action {
        ExportAction::Csv { days, out } => (
            out.unwrap_or_else(|| PathBuf::from(csv_file_name(date))),
            dash.export_csv(days.unwrap_or(export_days)),
        ),
        ExportAction::Report { days, out } => (
            out.unwrap_or_else(|| PathBuf::from(report_file_name(date))),
            dash.summary_report(days.unwrap_or(export_days)),
        ),
    };
    std::fs::write(&path, body)?;
    println!("wrote {}", path.display());
    Ok(())
}
