mod config;
pub mod database;
pub mod schema;

pub use config::{Config, DatabaseConfig, HistoryConfig, PeopleConfig};
pub use database::{Database, PooledConn};
pub use schema::SchemaReport;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory holding `config.toml` and the database.
///
/// Resolution order:
/// - `CHECKLIST_DATA_DIR`, used verbatim when set;
/// - `~/.config/checklist-dev/` when `CHECKLIST_ENV=dev`;
/// - `~/.config/checklist/` otherwise.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("CHECKLIST_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("CHECKLIST_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("checklist-dev")
            } else {
                base_dir.join("checklist")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
