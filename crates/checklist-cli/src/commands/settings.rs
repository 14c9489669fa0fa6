use clap::Subcommand;
use checklist_core::UserMode;

use super::{open_dashboard, CmdResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show the current settings
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Change the settings
    Set {
        /// family, individual_a or individual_b
        #[arg(long)]
        mode: Option<String>,
        /// Show person A's column (family mode)
        #[arg(long)]
        show_a: Option<bool>,
        /// Show person B's column (family mode)
        #[arg(long)]
        show_b: Option<bool>,
    },
}

pub fn run(action: SettingsAction) -> CmdResult {
    let dash = open_dashboard()?;
    match action {
        SettingsAction::Show { json } => {
            let settings = dash.settings();
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                println!("mode = {}", settings.mode.as_str());
                println!("show_a = {}", settings.show_a);
                println!("show_b = {}", settings.show_b);
            }
        }
        SettingsAction::Set {
            mode,
            show_a,
            show_b,
        } => {
            let mut settings = dash.settings();
            if let Some(mode) = mode {
                settings.mode = mode.parse::<UserMode>()?;
            }
            if let Some(show) = show_a {
                settings.show_a = show;
            }
            if let Some(show) = show_b {
                settings.show_b = show;
            }
            if !dash.save_settings(settings) {
                return Err("saving settings failed".into());
            }
            println!("ok");
        }
    }
    Ok(())
}
