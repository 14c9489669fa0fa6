//! Current streak of perfect days.
//!
//! The walk only looks at the most recent [`STREAK_LOOKBACK`] rollup rows
//! and only at rows that exist: a date with no entries is skipped, not
//! counted as a broken day.

use serde::{Deserialize, Serialize};

use super::rollup::DayRollup;
use crate::objectives::Person;

/// Number of most recent rolled-up days a streak can span.
pub const STREAK_LOOKBACK: usize = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub a: u32,
    pub b: u32,
}

impl Streaks {
    pub fn get(&self, person: Person) -> u32 {
        match person {
            Person::A => self.a,
            Person::B => self.b,
        }
    }
}

/// Count each person's perfect days back from the most recent one,
/// stopping at the first day that was not perfect.
pub fn streaks(rollup: &[DayRollup]) -> Streaks {
    let mut recent: Vec<&DayRollup> = rollup.iter().collect();
    recent.sort_by(|x, y| y.date.cmp(&x.date));
    recent.truncate(STREAK_LOOKBACK);

    let run = |person: Person| {
        recent
            .iter()
            .take_while(|day| day.is_perfect(person))
            .count() as u32
    };
    Streaks {
        a: run(Person::A),
        b: run(Person::B),
    }
}
