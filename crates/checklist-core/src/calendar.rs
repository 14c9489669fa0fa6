//! Calendar helpers: the invocation-wide "today" and date formatting.

use chrono::{Datelike, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Timezone used when the configuration does not name a valid one.
pub const DEFAULT_TIMEZONE: &str = "Europe/Paris";

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// The current date, resolved once per invocation.
///
/// Every date-keyed read and write during an invocation uses the same
/// value, so a run that straddles midnight still touches a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Today {
    pub date: NaiveDate,
    pub iso_week: u32,
    pub day_of_year: u32,
}

impl Today {
    /// Resolve today's date in the given timezone.
    pub fn resolve(tz: Tz) -> Self {
        Self::at(Utc::now().with_timezone(&tz).date_naive())
    }

    /// Resolve today's date from a timezone name, falling back to
    /// [`DEFAULT_TIMEZONE`] when the name is not a known IANA zone.
    pub fn resolve_named(name: &str) -> Self {
        Self::resolve(parse_timezone(name))
    }

    /// Build a `Today` for a fixed date.
    pub fn at(date: NaiveDate) -> Self {
        Self {
            date,
            iso_week: iso_week(date),
            day_of_year: date.ordinal(),
        }
    }

    /// First date of a trailing window of `days` days ending today.
    pub fn window_start(&self, days: u32) -> NaiveDate {
        window_start(self.date, days)
    }
}

/// Parse an IANA timezone name, falling back to [`DEFAULT_TIMEZONE`].
pub fn parse_timezone(name: &str) -> Tz {
    match name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!(timezone = name, "unknown timezone, using {DEFAULT_TIMEZONE}");
            chrono_tz::Europe::Paris
        }
    }
}

/// ISO-8601 week number of `date`.
pub fn iso_week(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// `today - days`, the inclusive lower bound of a history window.
///
/// Saturates at [`NaiveDate::MIN`] for windows reaching past the
/// representable calendar.
pub fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Long human-readable form, e.g. `Monday 19/10/2026`.
pub fn format_long_date(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    format!("{weekday} {}", date.format("%d/%m/%Y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn today_at_computes_week_and_ordinal() {
        let today = Today::at(d(2026, 10, 19));
        assert_eq!(today.iso_week, 43);
        assert_eq!(today.day_of_year, 292);
    }

    #[test]
    fn iso_week_wraps_at_year_boundary() {
        // 2021-01-03 is a Sunday in ISO week 53 of 2020.
        assert_eq!(iso_week(d(2021, 1, 3)), 53);
        assert_eq!(iso_week(d(2021, 1, 4)), 1);
    }

    #[test]
    fn leap_day_ordinal() {
        assert_eq!(Today::at(d(2024, 12, 31)).day_of_year, 366);
    }

    #[test]
    fn window_start_subtracts_days() {
        assert_eq!(window_start(d(2026, 3, 2), 7), d(2026, 2, 23));
        assert_eq!(window_start(d(2026, 3, 2), 0), d(2026, 3, 2));
    }

    #[test]
    fn huge_window_saturates_instead_of_overflowing() {
        assert_eq!(window_start(d(2026, 10, 19), u32::MAX), NaiveDate::MIN);
        assert_eq!(Today::at(d(2026, 10, 19)).window_start(u32::MAX), NaiveDate::MIN);
    }

    #[test]
    fn long_date_format() {
        assert_eq!(format_long_date(d(2026, 10, 19)), "Monday 19/10/2026");
        assert_eq!(format_long_date(d(2026, 10, 25)), "Sunday 25/10/2026");
    }

    #[test]
    fn unknown_timezone_falls_back() {
        assert_eq!(parse_timezone("Mars/Olympus"), chrono_tz::Europe::Paris);
        assert_eq!(parse_timezone("Asia/Tokyo"), chrono_tz::Asia::Tokyo);
    }
}
