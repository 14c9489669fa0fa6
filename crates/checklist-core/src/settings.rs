//! Singleton user settings row.

use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::error::{DatabaseError, ValidationError};
use crate::objectives::Person;
use crate::storage::Database;

/// Who is using the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserMode {
    /// Both people, each column toggled independently.
    #[default]
    Family,
    /// Person A only.
    IndividualA,
    /// Person B only.
    IndividualB,
}

impl UserMode {
    pub fn as_str(self) -> &'static str {
        match self {
            UserMode::Family => "family",
            UserMode::IndividualA => "individual_a",
            UserMode::IndividualB => "individual_b",
        }
    }
}

impl std::str::FromStr for UserMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "family" => Ok(UserMode::Family),
            "individual_a" => Ok(UserMode::IndividualA),
            "individual_b" => Ok(UserMode::IndividualB),
            other => Err(ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("unknown mode '{other}'"),
            }),
        }
    }
}

/// Display settings shared by both people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub mode: UserMode,
    pub show_a: bool,
    pub show_b: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            mode: UserMode::Family,
            show_a: true,
            show_b: true,
        }
    }
}

impl UserSettings {
    /// Apply the mode to the visibility toggles.
    ///
    /// Individual modes show exactly one person; family mode keeps the
    /// toggles as given.
    pub fn normalized(self) -> Self {
        match self.mode {
            UserMode::Family => self,
            UserMode::IndividualA => Self {
                show_a: true,
                show_b: false,
                ..self
            },
            UserMode::IndividualB => Self {
                show_a: false,
                show_b: true,
                ..self
            },
        }
    }

    pub fn shows(&self, person: Person) -> bool {
        match person {
            Person::A => self.show_a,
            Person::B => self.show_b,
        }
    }
}

/// Reads and replaces the settings row.
#[derive(Clone)]
pub struct SettingsStore {
    db: Database,
}

impl SettingsStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The stored settings, inserting the default row if none exists.
    ///
    /// # Errors
    /// Returns an error if the read or the default insert fails.
    pub fn get(&self) -> Result<UserSettings, DatabaseError> {
        let stored = {
            let conn = self.db.conn()?;
            conn.query_row(
                "SELECT mode, show_a, show_b FROM user_settings ORDER BY id LIMIT 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, bool>(1)?,
                        row.get::<_, bool>(2)?,
                    ))
                },
            )
            .optional()?
        };

        match stored {
            Some((mode, show_a, show_b)) => Ok(UserSettings {
                mode: mode.parse().unwrap_or_else(|e| {
                    tracing::warn!("{e}; using family mode");
                    UserMode::Family
                }),
                show_a,
                show_b,
            }),
            None => {
                let defaults = UserSettings::default();
                self.db.with_transaction(|tx| insert(tx, &defaults))?;
                tracing::debug!("inserted default settings");
                Ok(defaults)
            }
        }
    }

    /// Replace the settings row with `settings`.
    ///
    /// # Errors
    /// Returns an error if the replace fails; the previous row is kept.
    pub fn set(&self, settings: &UserSettings) -> Result<(), DatabaseError> {
        self.db.with_transaction(|tx| {
            tx.execute("DELETE FROM user_settings", [])?;
            insert(tx, settings)
        })?;
        tracing::debug!(mode = settings.mode.as_str(), "saved settings");
        Ok(())
    }

    /// Number of settings rows; one after any `get` or `set`.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn row_count(&self) -> Result<usize, DatabaseError> {
        let conn = self.db.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM user_settings", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn insert(conn: &rusqlite::Connection, settings: &UserSettings) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO user_settings (mode, show_a, show_b) VALUES (?1, ?2, ?3)",
        params![settings.mode.as_str(), settings.show_a, settings.show_b],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SettingsStore {
        SettingsStore::new(Database::open_memory().unwrap())
    }

    #[test]
    fn get_inserts_default_row_once() {
        let store = store();
        assert_eq!(store.row_count().unwrap(), 0);
        assert_eq!(store.get().unwrap(), UserSettings::default());
        assert_eq!(store.get().unwrap(), UserSettings::default());
        assert_eq!(store.row_count().unwrap(), 1);
    }

    #[test]
    fn last_set_wins_and_keeps_one_row() {
        let store = store();
        store
            .set(&UserSettings {
                mode: UserMode::Family,
                show_a: false,
                show_b: true,
            })
            .unwrap();
        let second = UserSettings {
            mode: UserMode::IndividualB,
            show_a: false,
            show_b: true,
        };
        store.set(&second).unwrap();
        assert_eq!(store.get().unwrap(), second);
        assert_eq!(store.row_count().unwrap(), 1);
    }

    #[test]
    fn normalized_applies_mode() {
        let hidden = UserSettings {
            mode: UserMode::IndividualA,
            show_a: false,
            show_b: true,
        };
        let n = hidden.normalized();
        assert!(n.show_a && !n.show_b);

        let family = UserSettings {
            mode: UserMode::Family,
            show_a: false,
            show_b: true,
        };
        assert_eq!(family.normalized(), family);
        assert!(!family.shows(Person::A));
    }

    #[test]
    fn mode_parses_stored_names() {
        for mode in [UserMode::Family, UserMode::IndividualA, UserMode::IndividualB] {
            assert_eq!(mode.as_str().parse::<UserMode>().unwrap(), mode);
        }
        assert!("couple".parse::<UserMode>().is_err());
    }
}
