//! Per-date objective tracking.
//!
//! The entry set of a date is only ever replaced as a whole: a save
//! deletes every row of the date and inserts the new set inside one
//! transaction. There is no per-row update, which keeps repeated saves
//! idempotent and means readers see either the old set or the new one.

use chrono::NaiveDate;
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use crate::calendar::iso_week;
use crate::error::{DatabaseError, ValidationError};
use crate::storage::Database;

pub const DEFAULT_EMOJI: &str = "🎯";
pub const DEFAULT_CATEGORY: &str = "general";

/// Built-in objectives shown for a date with nothing saved yet.
pub const DEFAULT_OBJECTIVES: &[(&str, &str, &str)] = &[
    ("Quran reading", "📖", "spiritual"),
    ("Quran memorisation", "🧠", "spiritual"),
    ("Adhkar (remembrance)", "🤲", "spiritual"),
    ("Gubsarba Huwal Messeh", "💫", "spiritual"),
    ("No sugar", "🚫🍯", "health"),
    ("10,000 steps", "👟", "health"),
    ("Prayer on time", "🕌", "spiritual"),
    ("Meditation", "🧘", "wellbeing"),
    ("Morning invocation", "🌅", "spiritual"),
    ("Evening invocation", "🌙", "spiritual"),
];

/// One of the two people tracked side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Person {
    A,
    B,
}

impl Person {
    pub const BOTH: [Person; 2] = [Person::A, Person::B];

    pub fn as_str(self) -> &'static str {
        match self {
            Person::A => "a",
            Person::B => "b",
        }
    }
}

impl std::str::FromStr for Person {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Person::A),
            "b" => Ok(Person::B),
            other => Err(ValidationError::InvalidValue {
                field: "person".into(),
                message: format!("expected 'a' or 'b', got '{other}'"),
            }),
        }
    }
}

/// One trackable habit item for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveEntry {
    /// Row id; `None` until the entry has been saved.
    #[serde(default)]
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub label: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub completed_by_a: bool,
    #[serde(default)]
    pub completed_by_b: bool,
    #[serde(default)]
    pub note_a: String,
    #[serde(default)]
    pub note_b: String,
    /// ISO week of `date`, stored at save time.
    #[serde(default)]
    pub iso_week: Option<u32>,
}

fn default_emoji() -> String {
    DEFAULT_EMOJI.into()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.into()
}

impl ObjectiveEntry {
    /// A fresh, unsaved entry with default emoji and category.
    pub fn new(date: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            id: None,
            date,
            label: label.into(),
            emoji: default_emoji(),
            category: default_category(),
            completed_by_a: false,
            completed_by_b: false,
            note_a: String::new(),
            note_b: String::new(),
            iso_week: Some(iso_week(date)),
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn completed_by(&self, person: Person) -> bool {
        match person {
            Person::A => self.completed_by_a,
            Person::B => self.completed_by_b,
        }
    }

    pub fn set_completed(&mut self, person: Person, done: bool) {
        match person {
            Person::A => self.completed_by_a = done,
            Person::B => self.completed_by_b = done,
        }
    }

    pub fn note(&self, person: Person) -> &str {
        match person {
            Person::A => &self.note_a,
            Person::B => &self.note_b,
        }
    }

    pub fn set_note(&mut self, person: Person, note: impl Into<String>) {
        match person {
            Person::A => self.note_a = note.into(),
            Person::B => self.note_b = note.into(),
        }
    }

    /// Entries with a blank label are dropped on save.
    pub fn has_label(&self) -> bool {
        !self.label.trim().is_empty()
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let date_idx = row.as_ref().column_index("date")?;
        let raw_date: String = row.get(date_idx)?;
        let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                date_idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;
        Ok(Self {
            id: Some(row.get("id")?),
            date,
            label: row.get("label")?,
            emoji: row.get("emoji")?,
            category: row.get("category")?,
            completed_by_a: row.get("completed_by_a")?,
            completed_by_b: row.get("completed_by_b")?,
            note_a: row.get("note_a")?,
            note_b: row.get("note_b")?,
            iso_week: row.get("iso_week")?,
        })
    }
}

/// Entries for one date, and whether they came from the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "entries", rename_all = "snake_case")]
pub enum DayObjectives {
    /// Rows saved for the date, in insertion order.
    Stored(Vec<ObjectiveEntry>),
    /// Nothing saved yet; the built-in list, not persisted.
    Defaults(Vec<ObjectiveEntry>),
}

impl DayObjectives {
    pub fn entries(&self) -> &[ObjectiveEntry] {
        match self {
            DayObjectives::Stored(entries) | DayObjectives::Defaults(entries) => entries,
        }
    }

    pub fn into_entries(self) -> Vec<ObjectiveEntry> {
        match self {
            DayObjectives::Stored(entries) | DayObjectives::Defaults(entries) => entries,
        }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self, DayObjectives::Stored(_))
    }
}

/// The built-in objective list for `date`, all flags cleared.
pub fn default_objectives(date: NaiveDate) -> Vec<ObjectiveEntry> {
    DEFAULT_OBJECTIVES
        .iter()
        .map(|(label, emoji, category)| {
            ObjectiveEntry::new(date, *label)
                .with_emoji(*emoji)
                .with_category(*category)
        })
        .collect()
}

/// Append the default objectives whose labels are not already present.
///
/// Existing entries keep their position and state; on duplicate labels
/// the first occurrence wins.
pub fn merge_defaults(existing: Vec<ObjectiveEntry>, date: NaiveDate) -> Vec<ObjectiveEntry> {
    let mut merged: Vec<ObjectiveEntry> = Vec::with_capacity(existing.len() + DEFAULT_OBJECTIVES.len());
    for entry in existing.into_iter().chain(default_objectives(date)) {
        if !merged.iter().any(|e| e.label == entry.label) {
            merged.push(entry);
        }
    }
    merged
}

/// Find the entry whose label matches `label`, ignoring case and
/// surrounding whitespace.
pub fn find_mut<'a>(
    entries: &'a mut [ObjectiveEntry],
    label: &str,
) -> Result<&'a mut ObjectiveEntry, ValidationError> {
    let wanted = label.trim().to_lowercase();
    entries
        .iter_mut()
        .find(|e| e.label.trim().to_lowercase() == wanted)
        .ok_or_else(|| ValidationError::UnknownObjective(label.to_string()))
}

/// Mark the entry labelled `label` as done (or not) by `person`.
pub fn set_completion(
    entries: &mut [ObjectiveEntry],
    label: &str,
    person: Person,
    done: bool,
) -> Result<(), ValidationError> {
    find_mut(entries, label)?.set_completed(person, done);
    Ok(())
}

/// Replace `person`'s note on the entry labelled `label`.
pub fn set_note(
    entries: &mut [ObjectiveEntry],
    label: &str,
    person: Person,
    note: &str,
) -> Result<(), ValidationError> {
    find_mut(entries, label)?.set_note(person, note);
    Ok(())
}

/// Persists objective entries, one date at a time.
#[derive(Clone)]
pub struct ObjectiveStore {
    db: Database,
}

impl ObjectiveStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Entries saved for `date` in insertion order, or the default list
    /// when nothing is saved.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn load_for_date(&self, date: NaiveDate) -> Result<DayObjectives, DatabaseError> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, date, label, emoji, category, completed_by_a, completed_by_b,
                    note_a, note_b, iso_week
             FROM daily_objectives
             WHERE date = ?1
             ORDER BY id",
        )?;
        let rows = stmt.query_map(params![date.to_string()], ObjectiveEntry::from_row)?;
        let entries = rows.collect::<rusqlite::Result<Vec<_>>>()?;

        if entries.is_empty() {
            Ok(DayObjectives::Defaults(default_objectives(date)))
        } else {
            Ok(DayObjectives::Stored(entries))
        }
    }

    /// Replace every entry of `date` with `entries`.
    ///
    /// Entries with a blank label are skipped. Each stored row gets
    /// `date` and its ISO week regardless of what the entry carried.
    /// Returns the number of rows stored.
    ///
    /// # Errors
    /// Returns an error if the replace fails; the previous set for the
    /// date is left untouched.
    pub fn save_for_date(
        &self,
        date: NaiveDate,
        entries: &[ObjectiveEntry],
    ) -> Result<usize, DatabaseError> {
        let day = date.to_string();
        let week = iso_week(date);
        let stored = self.db.with_transaction(|tx| {
            tx.execute("DELETE FROM daily_objectives WHERE date = ?1", params![day])?;
            let mut stmt = tx.prepare(
                "INSERT INTO daily_objectives
                 (date, label, emoji, category, completed_by_a, completed_by_b,
                  note_a, note_b, iso_week)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            let mut stored = 0;
            for entry in entries.iter().filter(|e| e.has_label()) {
                stmt.execute(params![
                    day,
                    entry.label,
                    entry.emoji,
                    entry.category,
                    entry.completed_by_a,
                    entry.completed_by_b,
                    entry.note_a,
                    entry.note_b,
                    week,
                ])?;
                stored += 1;
            }
            Ok(stored)
        })?;
        tracing::debug!(%date, stored, "saved objectives");
        Ok(stored)
    }

    /// Delete every entry of `date`. Returns rows deleted.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn clear_for_date(&self, date: NaiveDate) -> Result<usize, DatabaseError> {
        let deleted = self.db.with_transaction(|tx| {
            tx.execute(
                "DELETE FROM daily_objectives WHERE date = ?1",
                params![date.to_string()],
            )
        })?;
        tracing::debug!(%date, deleted, "cleared objectives");
        Ok(deleted)
    }

    /// Every entry dated `since` or later, newest date first and in
    /// insertion order within a date.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn load_window(&self, since: NaiveDate) -> Result<Vec<ObjectiveEntry>, DatabaseError> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, date, label, emoji, category, completed_by_a, completed_by_b,
                    note_a, note_b, iso_week
             FROM daily_objectives
             WHERE date >= ?1
             ORDER BY date DESC, id ASC",
        )?;
        let rows = stmt.query_map(params![since.to_string()], ObjectiveEntry::from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Delete all objective history. Returns rows deleted.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn truncate_all(&self) -> Result<usize, DatabaseError> {
        let deleted = self.db.with_transaction(|tx| {
            let deleted = tx.execute("DELETE FROM daily_objectives", [])?;
            tx.execute(
                "DELETE FROM sqlite_sequence WHERE name = 'daily_objectives'",
                [],
            )?;
            Ok(deleted)
        })?;
        tracing::info!(deleted, "truncated objective history");
        Ok(deleted)
    }
}
