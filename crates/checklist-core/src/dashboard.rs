//! Entry point for front ends.
//!
//! The stores report every failure as an error. `Dashboard` is where the
//! read side degrades instead: a failed read of today's objectives shows
//! the default list, a failed history read shows an empty window, failed
//! settings reads show the defaults, and content always has a fallback.
//! Writes keep returning errors so the caller can tell the user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::Today;
use crate::content::{fallback_for_day, ContentSeries, ContentStore, DailyContent, ImportPayload, ImportSummary};
use crate::error::{Result, ValidationError};
use crate::export::{self, ReportContext};
use crate::objectives::{
    self, default_objectives, find_mut, merge_defaults, DayObjectives, ObjectiveEntry,
    ObjectiveStore, Person,
};
use crate::settings::{SettingsStore, UserSettings};
use crate::stats::HistoryReport;
use crate::storage::{Config, Database};

/// Today's pair of reflection texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayContent {
    pub day_of_year: u32,
    pub primary: DailyContent,
    pub secondary: DailyContent,
}

pub struct Dashboard {
    db: Database,
    today: Today,
    config: Config,
    objectives: ObjectiveStore,
    content: ContentStore,
    settings: SettingsStore,
}

impl Dashboard {
    pub fn new(db: Database, today: Today, config: Config) -> Self {
        Self {
            objectives: ObjectiveStore::new(db.clone()),
            content: ContentStore::new(db.clone()),
            settings: SettingsStore::new(db.clone()),
            db,
            today,
            config,
        }
    }

    pub fn today(&self) -> Today {
        self.today
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Seed the content series if they are empty.
    ///
    /// Failure is logged and reported as zero rows seeded; the fallback
    /// content still covers every day.
    pub fn seed_content(&self) -> usize {
        match self.content.seed_if_empty() {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("content seeding failed: {e}");
                0
            }
        }
    }

    // === Objectives ===

    /// Objectives for `date`, or the defaults if they cannot be read.
    pub fn objectives_for(&self, date: NaiveDate) -> DayObjectives {
        self.objectives.load_for_date(date).unwrap_or_else(|e| {
            tracing::warn!(%date, "loading objectives failed, showing defaults: {e}");
            DayObjectives::Defaults(default_objectives(date))
        })
    }

    pub fn today_objectives(&self) -> DayObjectives {
        self.objectives_for(self.today.date)
    }

    /// Replace today's set with `entries`.
    ///
    /// # Errors
    /// Returns an error if the save fails; nothing is changed then.
    pub fn save_today(&self, entries: &[ObjectiveEntry]) -> Result<usize> {
        Ok(self.objectives.save_for_date(self.today.date, entries)?)
    }

    /// Load today's set, let `edit` change it in memory, and save it back
    /// as a whole.
    ///
    /// Unlike [`Dashboard::today_objectives`] the read is not allowed to
    /// fall back, so a read failure can never overwrite stored entries
    /// with the defaults.
    ///
    /// # Errors
    /// Returns the read, edit, or save error.
    pub fn edit_today<F>(&self, edit: F) -> Result<usize>
    where
        F: FnOnce(&mut Vec<ObjectiveEntry>) -> std::result::Result<(), ValidationError>,
    {
        let mut entries = self.objectives.load_for_date(self.today.date)?.into_entries();
        edit(&mut entries)?;
        self.save_today(&entries)
    }

    /// Mark (or unmark) an objective as completed by `person`.
    ///
    /// # Errors
    /// Returns a validation error for an unknown label, or a database error.
    pub fn set_completion(&self, label: &str, person: Person, done: bool) -> Result<usize> {
        self.edit_today(|entries| objectives::set_completion(entries, label, person, done))
    }

    /// Replace `person`'s note on an objective.
    ///
    /// # Errors
    /// Returns a validation error for an unknown label, or a database error.
    pub fn set_note(&self, label: &str, person: Person, note: &str) -> Result<usize> {
        self.edit_today(|entries| objectives::set_note(entries, label, person, note))
    }

    /// Set completion and, when given, the note in a single save, so
    /// either both changes land or neither does.
    ///
    /// # Errors
    /// Returns a validation error for an unknown label, or a database error.
    pub fn record_check(
        &self,
        label: &str,
        person: Person,
        done: bool,
        note: Option<&str>,
    ) -> Result<usize> {
        self.edit_today(|entries| {
            objectives::set_completion(entries, label, person, done)?;
            if let Some(note) = note {
                objectives::set_note(entries, label, person, note)?;
            }
            Ok(())
        })
    }

    /// Append an objective to today's set.
    ///
    /// # Errors
    /// Returns a validation error if the label is blank or already present.
    pub fn add_objective(&self, label: &str, emoji: Option<&str>, category: Option<&str>) -> Result<usize> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "label".into(),
                message: "objective label is empty".into(),
            }
            .into());
        }
        let date = self.today.date;
        self.edit_today(|entries| {
            if find_mut(entries, label).is_ok() {
                return Err(ValidationError::InvalidValue {
                    field: "label".into(),
                    message: format!("'{label}' is already on today's list"),
                });
            }
            let mut entry = ObjectiveEntry::new(date, label);
            if let Some(emoji) = emoji {
                entry = entry.with_emoji(emoji);
            }
            if let Some(category) = category {
                entry = entry.with_category(category);
            }
            entries.push(entry);
            Ok(())
        })
    }

    /// Drop an objective from today's set.
    ///
    /// # Errors
    /// Returns a validation error for an unknown label, or a database error.
    pub fn remove_objective(&self, label: &str) -> Result<usize> {
        self.edit_today(|entries| {
            let wanted = find_mut(entries, label)?.label.clone();
            entries.retain(|e| e.label != wanted);
            Ok(())
        })
    }

    /// Add every default objective not already on today's list.
    ///
    /// # Errors
    /// Returns the read or save error.
    pub fn add_default_objectives(&self) -> Result<usize> {
        let date = self.today.date;
        let existing = self.objectives.load_for_date(date)?.into_entries();
        let merged = merge_defaults(existing, date);
        self.save_today(&merged)
    }

    /// Delete today's entries.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn clear_today(&self) -> Result<usize> {
        Ok(self.objectives.clear_for_date(self.today.date)?)
    }

    /// Delete all objective history.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn reset_all_data(&self) -> Result<usize> {
        Ok(self.objectives.truncate_all()?)
    }

    // === History ===

    /// Entries of the last `days` days, empty if they cannot be read.
    pub fn history(&self, days: u32) -> Vec<ObjectiveEntry> {
        let since = self.today.window_start(days);
        self.objectives.load_window(since).unwrap_or_else(|e| {
            tracing::warn!(%since, "loading history failed, showing none: {e}");
            Vec::new()
        })
    }

    pub fn report(&self, days: u32) -> HistoryReport {
        HistoryReport::build(&self.history(days))
    }

    pub fn export_csv(&self, days: u32) -> String {
        export::to_csv(&self.history(days))
    }

    pub fn summary_report(&self, days: u32) -> String {
        let report = self.report(days);
        export::summary_report(&ReportContext {
            period_days: days,
            generated_on: self.today.date,
            people: &self.config.people,
            report: &report,
        })
    }

    // === Content ===

    /// Stored content for the day, or the built-in fallback.
    pub fn content_for_day(&self, series: ContentSeries, day_of_year: u32) -> DailyContent {
        match self.content.content_for_day(series, day_of_year) {
            Ok(Some(content)) => content,
            Ok(None) => fallback_for_day(series, day_of_year),
            Err(e) => {
                tracing::warn!(series = series.as_str(), day_of_year, "loading content failed: {e}");
                fallback_for_day(series, day_of_year)
            }
        }
    }

    pub fn today_content(&self) -> TodayContent {
        let day = self.today.day_of_year;
        TodayContent {
            day_of_year: day,
            primary: self.content_for_day(ContentSeries::Primary, day),
            secondary: self.content_for_day(ContentSeries::Secondary, day),
        }
    }

    /// Replace content series from an import document.
    ///
    /// # Errors
    /// Returns a validation error for an empty payload, or a database error.
    pub fn import_content(&self, payload: &ImportPayload) -> Result<ImportSummary> {
        self.content.import_payload(payload)
    }

    // === Settings ===

    /// Current settings, or the defaults if they cannot be read.
    pub fn settings(&self) -> UserSettings {
        self.settings.get().unwrap_or_else(|e| {
            tracing::warn!("loading settings failed, using defaults: {e}");
            UserSettings::default()
        })
    }

    /// Store `settings` (normalized for its mode). Returns whether the
    /// save succeeded.
    pub fn save_settings(&self, settings: UserSettings) -> bool {
        match self.settings.set(&settings.normalized()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("saving settings failed: {e}");
                false
            }
        }
    }
}
