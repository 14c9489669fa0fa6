//! Statistics over a window of objective history.
//!
//! Everything here is a pure function of the entries passed in: no I/O,
//! no clock. The caller decides the window boundary.

mod category;
mod rollup;
mod streak;
mod summary;

pub use category::{category_breakdown, CategoryRate};
pub use rollup::{daily_rollup, percent, success_series, DayProgress, DayRollup, RatePoint};
pub use streak::{streaks, Streaks, STREAK_LOOKBACK};
pub use summary::{summary, HistoryReport, Summary};
