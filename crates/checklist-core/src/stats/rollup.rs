//! Per-day completion counts and the success-rate series built from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::objectives::{ObjectiveEntry, Person};

/// Completion counts for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRollup {
    pub date: NaiveDate,
    /// Number of objectives tracked that day.
    pub count: u32,
    pub a_done: u32,
    pub b_done: u32,
}

impl DayRollup {
    pub fn done(&self, person: Person) -> u32 {
        match person {
            Person::A => self.a_done,
            Person::B => self.b_done,
        }
    }

    /// Every objective of the day completed by `person`.
    pub fn is_perfect(&self, person: Person) -> bool {
        self.count > 0 && self.done(person) == self.count
    }

    pub fn rate(&self, person: Person) -> f64 {
        percent(self.done(person), self.count)
    }
}

/// One chart point: completion rates on a date, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub date: NaiveDate,
    pub a_rate: f64,
    pub b_rate: f64,
}

/// `100 * done / total`, or 0 when `total` is 0.
pub fn percent(done: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(done) * 100.0 / f64::from(total)
    }
}

/// Group entries by date, oldest date first.
///
/// Dates without entries do not appear.
pub fn daily_rollup(entries: &[ObjectiveEntry]) -> Vec<DayRollup> {
    let mut by_date: BTreeMap<NaiveDate, DayRollup> = BTreeMap::new();
    for entry in entries {
        let day = by_date.entry(entry.date).or_insert(DayRollup {
            date: entry.date,
            count: 0,
            a_done: 0,
            b_done: 0,
        });
        day.count += 1;
        day.a_done += u32::from(entry.completed_by_a);
        day.b_done += u32::from(entry.completed_by_b);
    }
    by_date.into_values().collect()
}

/// Success rate per person for each rolled-up date, in date order.
pub fn success_series(rollup: &[DayRollup]) -> Vec<RatePoint> {
    rollup
        .iter()
        .map(|day| RatePoint {
            date: day.date,
            a_rate: day.rate(Person::A),
            b_rate: day.rate(Person::B),
        })
        .collect()
}

/// Today's header figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProgress {
    pub total: u32,
    pub a_done: u32,
    pub b_done: u32,
    /// Whole percent, rounded down.
    pub a_percent: u32,
    pub b_percent: u32,
}

impl DayProgress {
    pub fn from_entries(entries: &[ObjectiveEntry]) -> Self {
        let total = entries.len() as u32;
        let a_done = entries.iter().filter(|e| e.completed_by_a).count() as u32;
        let b_done = entries.iter().filter(|e| e.completed_by_b).count() as u32;
        let whole = |done: u32| if total == 0 { 0 } else { done * 100 / total };
        Self {
            total,
            a_done,
            b_done,
            a_percent: whole(a_done),
            b_percent: whole(b_done),
        }
    }
}
