//! Completion rates per objective category.

use serde::{Deserialize, Serialize};

use super::rollup::percent;
use crate::objectives::ObjectiveEntry;

/// Totals and rates for one category across a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRate {
    pub category: String,
    pub total: u32,
    pub a_done: u32,
    pub b_done: u32,
    pub a_rate: f64,
    pub b_rate: f64,
}

/// Group entries by category, in the order categories first appear.
pub fn category_breakdown(entries: &[ObjectiveEntry]) -> Vec<CategoryRate> {
    let mut rates: Vec<CategoryRate> = Vec::new();
    for entry in entries {
        let index = match rates.iter().position(|r| r.category == entry.category) {
            Some(index) => index,
            None => {
                rates.push(CategoryRate {
                    category: entry.category.clone(),
                    total: 0,
                    a_done: 0,
                    b_done: 0,
                    a_rate: 0.0,
                    b_rate: 0.0,
                });
                rates.len() - 1
            }
        };
        let rate = &mut rates[index];
        rate.total += 1;
        rate.a_done += u32::from(entry.completed_by_a);
        rate.b_done += u32::from(entry.completed_by_b);
    }

    for rate in &mut rates {
        rate.a_rate = percent(rate.a_done, rate.total);
        rate.b_rate = percent(rate.b_done, rate.total);
    }
    rates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(category: &str, a: bool, b: bool) -> ObjectiveEntry {
        let mut e = ObjectiveEntry::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(), "x")
            .with_category(category);
        e.completed_by_a = a;
        e.completed_by_b = b;
        e
    }

    #[test]
    fn rates_per_category_in_first_seen_order() {
        let entries = vec![
            entry("health", true, false),
            entry("spiritual", true, true),
            entry("health", false, false),
            entry("health", true, true),
            entry("spiritual", false, true),
        ];
        let rates = category_breakdown(&entries);

        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].category, "health");
        assert_eq!(rates[0].total, 3);
        assert_eq!(rates[0].a_done, 2);
        assert!((rates[0].a_rate - 66.666).abs() < 0.01);
        assert!((rates[0].b_rate - 33.333).abs() < 0.01);
        assert_eq!(rates[1].category, "spiritual");
        assert_eq!(rates[1].a_rate, 50.0);
        assert_eq!(rates[1].b_rate, 100.0);
    }

    #[test]
    fn empty_window_has_no_categories() {
        assert!(category_breakdown(&[]).is_empty());
    }
}
