//! Window-wide summary and the bundled history report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::category::{category_breakdown, CategoryRate};
use super::rollup::{daily_rollup, percent, success_series, DayRollup, RatePoint};
use super::streak::{streaks, Streaks};
use crate::objectives::ObjectiveEntry;

/// Overall figures for a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Distinct dates with at least one entry.
    pub days: u32,
    /// Total entries in the window.
    pub entries: u32,
    pub a_done: u32,
    pub b_done: u32,
    pub a_rate: f64,
    pub b_rate: f64,
}

pub fn summary(entries: &[ObjectiveEntry]) -> Summary {
    let days = entries.iter().map(|e| e.date).collect::<BTreeSet<_>>().len() as u32;
    let total = entries.len() as u32;
    let a_done = entries.iter().filter(|e| e.completed_by_a).count() as u32;
    let b_done = entries.iter().filter(|e| e.completed_by_b).count() as u32;
    Summary {
        days,
        entries: total,
        a_done,
        b_done,
        a_rate: percent(a_done, total),
        b_rate: percent(b_done, total),
    }
}

/// Everything the reporting views show for a window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryReport {
    pub summary: Summary,
    pub rollup: Vec<DayRollup>,
    pub series: Vec<RatePoint>,
    pub categories: Vec<CategoryRate>,
    pub streaks: Streaks,
}

impl HistoryReport {
    pub fn build(entries: &[ObjectiveEntry]) -> Self {
        let rollup = daily_rollup(entries);
        Self {
            summary: summary(entries),
            series: success_series(&rollup),
            categories: category_breakdown(entries),
            streaks: streaks(&rollup),
            rollup,
        }
    }
}
