//! # Checklist Core Library
//!
//! Core logic for a two-person daily habit checklist. Every operation is
//! available through the standalone `checklist` binary, which is a thin
//! layer over this library.
//!
//! ## Architecture
//!
//! - **Storage**: SQLite behind an r2d2 pool, schema setup with additive
//!   migrations, TOML configuration
//! - **Stores**: objectives per date, the two daily content series, and the
//!   singleton user settings
//! - **Stats**: pure aggregation over a window of history
//! - **Dashboard**: the facade front ends use; turns read failures into
//!   fallbacks
//!
//! ## Key Components
//!
//! - [`Dashboard`]: Entry point for front ends
//! - [`Database`]: Connection pool and schema setup
//! - [`ObjectiveStore`]: Per-date objective persistence
//! - [`HistoryReport`]: Aggregated statistics for a window
//! - [`Config`]: Application configuration management

pub mod calendar;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod objectives;
pub mod settings;
pub mod stats;
pub mod storage;

pub use calendar::Today;
pub use content::{ContentSeries, ContentStore, DailyContent, ImportPayload, ImportSummary};
pub use dashboard::{Dashboard, TodayContent};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use objectives::{DayObjectives, ObjectiveEntry, ObjectiveStore, Person};
pub use settings::{SettingsStore, UserMode, UserSettings};
pub use stats::{DayProgress, HistoryReport};
pub use storage::{Config, Database};
