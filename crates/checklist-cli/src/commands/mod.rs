pub mod config;
pub mod content;
pub mod history;
pub mod objectives;
pub mod reset;
pub mod settings;
pub mod today;

use clap::ValueEnum;
use checklist_core::{Config, Dashboard, Database, Person, Today};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PersonArg {
    A,
    B,
}

impl From<PersonArg> for Person {
    fn from(arg: PersonArg) -> Self {
        match arg {
            PersonArg::A => Person::A,
            PersonArg::B => Person::B,
        }
    }
}

/// Load the config, open the database and fix today's date for this run.
pub fn open_dashboard() -> Result<Dashboard, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open(&config)?;
    let today = Today::resolve_named(&config.timezone);
    tracing::debug!(date = %today.date, timezone = %config.timezone, "resolved today");
    Ok(Dashboard::new(db, today, config))
}

pub fn display_name(config: &Config, person: Person) -> &str {
    match person {
        Person::A => &config.people.a_name,
        Person::B => &config.people.b_name,
    }
}
