//! Daily reflection content.
//!
//! Two independent series ([`ContentSeries::Primary`] and
//! [`ContentSeries::Secondary`]) each hold one text per day of the year.
//! When nothing is stored for a day, a small built-in demo series is
//! cycled so every day still has something to show.

use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::error::{DatabaseError, Result, ValidationError};
use crate::storage::schema::{PRIMARY_CONTENT_TABLE, SECONDARY_CONTENT_TABLE};
use crate::storage::Database;

/// Number of day slots in a series.
pub const SERIES_LEN: usize = 365;

/// One of the two daily content series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSeries {
    Primary,
    Secondary,
}

impl ContentSeries {
    pub const ALL: [ContentSeries; 2] = [ContentSeries::Primary, ContentSeries::Secondary];

    fn table(self) -> &'static str {
        match self {
            ContentSeries::Primary => PRIMARY_CONTENT_TABLE,
            ContentSeries::Secondary => SECONDARY_CONTENT_TABLE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentSeries::Primary => "primary",
            ContentSeries::Secondary => "secondary",
        }
    }
}

/// A text in its original language, its translation, and where it is from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyContent {
    #[serde(alias = "arabic")]
    pub original_text: String,
    #[serde(alias = "french")]
    pub translated_text: String,
    #[serde(alias = "reference")]
    pub source_reference: String,
}

impl DailyContent {
    fn new(original: &str, translated: &str, reference: &str) -> Self {
        Self {
            original_text: original.to_string(),
            translated_text: translated.to_string(),
            source_reference: reference.to_string(),
        }
    }
}

/// Bulk import document: one list per series.
///
/// Only the first [`SERIES_LEN`] records of each list are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportPayload {
    #[serde(default, alias = "hadiths")]
    pub primary: Vec<DailyContent>,
    #[serde(default, alias = "ayats")]
    pub secondary: Vec<DailyContent>,
}

impl ImportPayload {
    /// Parse a JSON import document.
    ///
    /// # Errors
    /// Returns an error if the text is not a valid payload.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Rows imported per series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub primary: usize,
    pub secondary: usize,
}

fn demo_items(series: ContentSeries) -> [DailyContent; 3] {
    match series {
        ContentSeries::Primary => [
            DailyContent::new(
                "إِنَّمَا الأَعْمَالُ بِالنِّيَّاتِ",
                "Actions are judged only by intentions",
                "Sahih al-Bukhari",
            ),
            DailyContent::new(
                "أَحَبُّ الأَعْمَالِ إِلَى اللَّهِ أَدْوَمُهَا وَإِنْ قَلَّ",
                "The deeds most loved by God are the most regular, even if small",
                "Sahih al-Bukhari",
            ),
            DailyContent::new(
                "مَنْ لَمْ يَشْكُرِ النَّاسَ لَمْ يَشْكُرِ اللَّهَ",
                "Whoever does not thank people does not thank God",
                "Sahih at-Tirmidhi",
            ),
        ],
        ContentSeries::Secondary => [
            DailyContent::new(
                "وَمَن يَتَّقِ اللَّهَ يَجْعَل لَّهُ مَخْرَجًا",
                "Whoever is mindful of God, He will make a way out for them",
                "Quran 65:2",
            ),
            DailyContent::new(
                "وَاللَّهُ مَعَ الصَّابِرِينَ",
                "And God is with the patient",
                "Quran 2:153",
            ),
            DailyContent::new(
                "فَاذْكُرُونِي أَذْكُرْكُمْ",
                "So remember Me; I will remember you",
                "Quran 2:152",
            ),
        ],
    }
}

/// The built-in demo series, cycled to exactly [`SERIES_LEN`] entries.
pub fn demo_series(series: ContentSeries) -> Vec<DailyContent> {
    demo_items(series)
        .into_iter()
        .cycle()
        .take(SERIES_LEN)
        .collect()
}

/// Deterministic fallback for `day_of_year`: `demo[(day - 1) mod len]`.
///
/// Any value is accepted; day 0 wraps to the last entry.
pub fn fallback_for_day(series: ContentSeries, day_of_year: u32) -> DailyContent {
    let demo = demo_series(series);
    let index = (i64::from(day_of_year) - 1).rem_euclid(demo.len() as i64) as usize;
    demo[index].clone()
}

/// Reads and replaces the two content series.
#[derive(Clone)]
pub struct ContentStore {
    db: Database,
}

impl ContentStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Number of stored rows in `series`.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn count(&self, series: ContentSeries) -> Result<usize, DatabaseError> {
        let conn = self.db.conn()?;
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", series.table()),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Fill each empty series with the demo content.
    ///
    /// Inserts ignore day slots that already exist, so two processes
    /// seeding at once end up with a single copy. Returns rows inserted.
    ///
    /// # Errors
    /// Returns an error if a count or insert fails; the failing series'
    /// transaction is rolled back.
    pub fn seed_if_empty(&self) -> Result<usize, DatabaseError> {
        let mut inserted = 0;
        for series in ContentSeries::ALL {
            if self.count(series)? > 0 {
                continue;
            }
            let demo = demo_series(series);
            let sql = format!(
                "INSERT INTO {} (day_of_year, original_text, translated_text, source_reference)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(day_of_year) DO NOTHING",
                series.table()
            );
            let rows = self.db.with_transaction(|tx| {
                let mut stmt = tx.prepare(&sql)?;
                let mut rows = 0;
                for (i, item) in demo.iter().enumerate() {
                    rows += stmt.execute(params![
                        (i + 1) as i64,
                        item.original_text,
                        item.translated_text,
                        item.source_reference
                    ])?;
                }
                Ok(rows)
            })?;
            tracing::info!(series = series.as_str(), rows, "seeded demo content");
            inserted += rows;
        }
        Ok(inserted)
    }

    /// The stored entry for `day_of_year`, if any.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn content_for_day(
        &self,
        series: ContentSeries,
        day_of_year: u32,
    ) -> Result<Option<DailyContent>, DatabaseError> {
        let conn = self.db.conn()?;
        let row = conn
            .query_row(
                &format!(
                    "SELECT original_text, translated_text, source_reference
                     FROM {} WHERE day_of_year = ?1",
                    series.table()
                ),
                params![day_of_year],
                |row| {
                    Ok(DailyContent {
                        original_text: row.get(0)?,
                        translated_text: row.get(1)?,
                        source_reference: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Replace `series` wholesale with `entries`.
    ///
    /// Rows are numbered 1.. in input order; entries past [`SERIES_LEN`]
    /// are dropped. Returns the number stored.
    ///
    /// # Errors
    /// Returns an error if the replace fails; the previous content is
    /// kept in that case.
    pub fn import_series(
        &self,
        series: ContentSeries,
        entries: &[DailyContent],
    ) -> Result<usize, DatabaseError> {
        let kept = &entries[..entries.len().min(SERIES_LEN)];
        let table = series.table();
        let count = self.db.with_transaction(|tx| {
            tx.execute(&format!("DELETE FROM {table}"), [])?;
            tx.execute(
                "DELETE FROM sqlite_sequence WHERE name = ?1",
                params![table],
            )?;
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table} (day_of_year, original_text, translated_text, source_reference)
                 VALUES (?1, ?2, ?3, ?4)"
            ))?;
            for (i, item) in kept.iter().enumerate() {
                stmt.execute(params![
                    (i + 1) as i64,
                    item.original_text,
                    item.translated_text,
                    item.source_reference
                ])?;
            }
            Ok(kept.len())
        })?;
        if entries.len() > SERIES_LEN {
            tracing::debug!(
                series = series.as_str(),
                dropped = entries.len() - SERIES_LEN,
                "import truncated"
            );
        }
        tracing::info!(series = series.as_str(), count, "imported content");
        Ok(count)
    }

    /// Import every non-empty list of `payload`.
    ///
    /// # Errors
    /// Returns a validation error if both lists are empty, or the first
    /// database error.
    pub fn import_payload(&self, payload: &ImportPayload) -> Result<ImportSummary> {
        if payload.primary.is_empty() && payload.secondary.is_empty() {
            return Err(ValidationError::EmptyCollection("import payload has no content".into()).into());
        }
        let mut summary = ImportSummary::default();
        if !payload.primary.is_empty() {
            summary.primary = self.import_series(ContentSeries::Primary, &payload.primary)?;
        }
        if !payload.secondary.is_empty() {
            summary.secondary = self.import_series(ContentSeries::Secondary, &payload.secondary)?;
        }
        Ok(summary)
    }
}
