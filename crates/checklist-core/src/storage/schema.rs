//! Schema creation and additive upgrades.
//!
//! Setup runs on every open and never aborts it: whatever goes wrong is
//! collected into a [`SchemaReport`] and logged, and the application keeps
//! running against whatever schema resulted.

use indoc::indoc;
use rusqlite::{params, Connection, Result as SqliteResult};
use serde::{Deserialize, Serialize};

pub const OBJECTIVES_TABLE: &str = "daily_objectives";
pub const PRIMARY_CONTENT_TABLE: &str = "primary_content";
pub const SECONDARY_CONTENT_TABLE: &str = "secondary_content";
pub const SETTINGS_TABLE: &str = "user_settings";

const OBJECTIVES_DDL: &str = indoc! {"
    CREATE TABLE IF NOT EXISTS daily_objectives (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        date           TEXT NOT NULL,
        label          TEXT NOT NULL,
        emoji          TEXT NOT NULL DEFAULT '🎯',
        category       TEXT NOT NULL DEFAULT 'general',
        completed_by_a INTEGER NOT NULL DEFAULT 0,
        completed_by_b INTEGER NOT NULL DEFAULT 0,
        note_a         TEXT NOT NULL DEFAULT '',
        note_b         TEXT NOT NULL DEFAULT '',
        iso_week       INTEGER,
        created_at     TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
    CREATE INDEX IF NOT EXISTS idx_daily_objectives_date ON daily_objectives(date);
"};

const SETTINGS_DDL: &str = indoc! {"
    CREATE TABLE IF NOT EXISTS user_settings (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        mode       TEXT NOT NULL DEFAULT 'family',
        show_a     INTEGER NOT NULL DEFAULT 1,
        show_b     INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
"};

/// Columns added to `daily_objectives` after its first release.
const OBJECTIVE_UPGRADE_COLUMNS: &[(&str, &str)] = &[
    ("emoji", "TEXT NOT NULL DEFAULT '🎯'"),
    ("category", "TEXT NOT NULL DEFAULT 'general'"),
    ("note_a", "TEXT NOT NULL DEFAULT ''"),
    ("note_b", "TEXT NOT NULL DEFAULT ''"),
    ("iso_week", "INTEGER"),
];

/// Outcome of schema setup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaReport {
    /// Tables that did not exist before setup.
    pub created_tables: Vec<String>,
    /// Columns added to an older objective table.
    pub added_columns: Vec<String>,
    /// Non-fatal problems met along the way.
    pub warnings: Vec<String>,
}

impl SchemaReport {
    pub(crate) fn failed(message: String) -> Self {
        Self {
            warnings: vec![message],
            ..Self::default()
        }
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("schema: {message}");
        self.warnings.push(message);
    }
}

/// Create missing tables, then upgrade older ones.
pub fn setup(conn: &Connection) -> SchemaReport {
    let mut report = SchemaReport::default();
    match ensure_schema(conn) {
        Ok(created) => report.created_tables = created,
        Err(e) => report.warn(format!("table creation failed: {e}")),
    }
    migrate_schema(conn, &mut report);
    report
}

/// Create the four tables if they are absent.
///
/// Returns the names of the tables that were actually created.
///
/// # Errors
/// Returns the first SQLite error; tables created before it stay created.
pub fn ensure_schema(conn: &Connection) -> SqliteResult<Vec<String>> {
    let mut created = Vec::new();

    if !table_exists(conn, OBJECTIVES_TABLE)? {
        created.push(OBJECTIVES_TABLE.to_string());
    }
    conn.execute_batch(OBJECTIVES_DDL)?;

    for table in [PRIMARY_CONTENT_TABLE, SECONDARY_CONTENT_TABLE] {
        if !table_exists(conn, table)? {
            created.push(table.to_string());
        }
        conn.execute_batch(&content_ddl(table))?;
    }

    if !table_exists(conn, SETTINGS_TABLE)? {
        created.push(SETTINGS_TABLE.to_string());
    }
    conn.execute_batch(SETTINGS_DDL)?;

    if !created.is_empty() {
        tracing::info!(tables = ?created, "created tables");
    }
    Ok(created)
}

/// Bring an existing objective table up to date, one column at a time.
///
/// A column that cannot be added is recorded as a warning and the
/// remaining columns are still attempted. The settings table is created
/// here too when an older database predates it.
pub fn migrate_schema(conn: &Connection, report: &mut SchemaReport) {
    match table_exists(conn, OBJECTIVES_TABLE) {
        Ok(true) => {}
        Ok(false) => {
            match ensure_schema(conn) {
                Ok(created) => report.created_tables.extend(created),
                Err(e) => report.warn(format!("table creation failed: {e}")),
            }
            return;
        }
        Err(e) => {
            report.warn(format!("cannot inspect {OBJECTIVES_TABLE}: {e}"));
            return;
        }
    }

    let existing = match table_columns(conn, OBJECTIVES_TABLE) {
        Ok(columns) => columns,
        Err(e) => {
            report.warn(format!("cannot list columns of {OBJECTIVES_TABLE}: {e}"));
            return;
        }
    };

    for (name, definition) in OBJECTIVE_UPGRADE_COLUMNS {
        if existing.iter().any(|c| c == name) {
            continue;
        }
        let sql = format!("ALTER TABLE {OBJECTIVES_TABLE} ADD COLUMN {name} {definition}");
        match conn.execute(&sql, []) {
            Ok(_) => {
                tracing::info!(column = name, "added column to {OBJECTIVES_TABLE}");
                report.added_columns.push((*name).to_string());
            }
            Err(e) => report.warn(format!("could not add column {name}: {e}")),
        }
    }

    match table_exists(conn, SETTINGS_TABLE) {
        Ok(true) => {}
        Ok(false) => match conn.execute_batch(SETTINGS_DDL) {
            Ok(()) => report.created_tables.push(SETTINGS_TABLE.to_string()),
            Err(e) => report.warn(format!("could not create {SETTINGS_TABLE}: {e}")),
        },
        Err(e) => report.warn(format!("cannot inspect {SETTINGS_TABLE}: {e}")),
    }
}

fn content_ddl(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            day_of_year      INTEGER NOT NULL UNIQUE,
            original_text    TEXT NOT NULL,
            translated_text  TEXT NOT NULL,
            source_reference TEXT NOT NULL
        );"
    )
}

fn table_exists(conn: &Connection, table: &str) -> SqliteResult<bool> {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![table],
        |row| row.get::<_, i64>(0),
    )
    .map(|count| count > 0)
}

fn table_columns(conn: &Connection, table: &str) -> SqliteResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let rows = stmt.query_map(params![table], |row| row.get::<_, String>(0))?;
    rows.collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE daily_objectives (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                label TEXT NOT NULL,
                completed_by_a INTEGER NOT NULL DEFAULT 0,
                completed_by_b INTEGER NOT NULL DEFAULT 0
            );
            INSERT INTO daily_objectives (date, label, completed_by_a)
            VALUES ('2026-01-05', 'Walk', 1);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn setup_from_scratch_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        let report = setup(&conn);
        assert_eq!(
            report.created_tables,
            vec![
                OBJECTIVES_TABLE,
                PRIMARY_CONTENT_TABLE,
                SECONDARY_CONTENT_TABLE,
                SETTINGS_TABLE
            ]
        );
        assert!(report.added_columns.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn setup_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        setup(&conn);
        let second = setup(&conn);
        assert_eq!(second, SchemaReport::default());
    }

    #[test]
    fn legacy_table_gains_missing_columns_with_defaults() {
        let conn = legacy_conn();
        let report = setup(&conn);

        assert_eq!(
            report.added_columns,
            vec!["emoji", "category", "note_a", "note_b", "iso_week"]
        );
        assert!(report.warnings.is_empty());

        let (emoji, category, note_a, iso_week): (String, String, String, Option<i64>) = conn
            .query_row(
                "SELECT emoji, category, note_a, iso_week FROM daily_objectives",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .unwrap();
        assert_eq!(emoji, "🎯");
        assert_eq!(category, "general");
        assert_eq!(note_a, "");
        assert_eq!(iso_week, None);
    }

    #[test]
    fn one_failing_column_does_not_stop_the_rest() {
        let conn = Connection::open_in_memory().unwrap();
        // "Emoji" differs in case, so the upgrade tries to add "emoji"
        // and SQLite rejects it as a duplicate.
        conn.execute_batch(
            "CREATE TABLE daily_objectives (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                label TEXT NOT NULL,
                Emoji TEXT,
                completed_by_a INTEGER NOT NULL DEFAULT 0,
                completed_by_b INTEGER NOT NULL DEFAULT 0
            );",
        )
        .unwrap();

        let mut report = SchemaReport::default();
        migrate_schema(&conn, &mut report);

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("emoji"));
        assert_eq!(
            report.added_columns,
            vec!["category", "note_a", "note_b", "iso_week"]
        );
    }

    #[test]
    fn settings_table_created_for_older_database() {
        let conn = legacy_conn();
        let mut report = SchemaReport::default();
        migrate_schema(&conn, &mut report);
        assert_eq!(report.created_tables, vec![SETTINGS_TABLE]);
        assert!(table_exists(&conn, SETTINGS_TABLE).unwrap());
    }

    #[test]
    fn migrate_without_objective_table_creates_schema() {
        let conn = Connection::open_in_memory().unwrap();
        let mut report = SchemaReport::default();
        migrate_schema(&conn, &mut report);
        assert_eq!(report.created_tables.len(), 4);
    }
}
