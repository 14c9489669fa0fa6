//! Property tests for objective persistence and the history statistics.

use chrono::NaiveDate;
use checklist_core::objectives::ObjectiveStore;
use checklist_core::stats::{category_breakdown, daily_rollup, streaks, summary, STREAK_LOOKBACK};
use checklist_core::{Database, ObjectiveEntry};
use proptest::prelude::*;

fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + chrono::Duration::days(i64::from(offset))
}

fn entry_strategy() -> impl Strategy<Value = ObjectiveEntry> {
    (
        0u32..20,
        "[ a-zA-Z]{0,12}",
        prop::sample::select(vec!["health", "spiritual", "learning", "general"]),
        any::<bool>(),
        any::<bool>(),
        "[a-z ]{0,8}",
    )
        .prop_map(|(offset, label, category, a, b, note)| {
            let mut entry = ObjectiveEntry::new(day(offset), label).with_category(category);
            entry.completed_by_a = a;
            entry.completed_by_b = b;
            entry.note_a = note;
            entry
        })
}

/// The fields a save is expected to keep.
fn content(e: &ObjectiveEntry) -> (String, String, String, bool, bool, String, String) {
    (
        e.label.clone(),
        e.emoji.clone(),
        e.category.clone(),
        e.completed_by_a,
        e.completed_by_b,
        e.note_a.clone(),
        e.note_b.clone(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn save_then_load_keeps_labelled_entries_in_order(
        entries in prop::collection::vec(entry_strategy(), 1..12),
    ) {
        let store = ObjectiveStore::new(Database::open_memory().unwrap());
        let date = day(3);
        let stored = store.save_for_date(date, &entries).unwrap();

        let expected: Vec<_> = entries.iter().filter(|e| e.has_label()).map(content).collect();
        prop_assert_eq!(stored, expected.len());

        let loaded = store.load_for_date(date).unwrap();
        if expected.is_empty() {
            prop_assert!(!loaded.is_stored());
        } else {
            prop_assert!(loaded.is_stored());
            let got: Vec<_> = loaded.entries().iter().map(content).collect();
            prop_assert_eq!(got, expected);
            prop_assert!(loaded.entries().iter().all(|e| e.date == date && e.iso_week == Some(1)));
        }
    }

    #[test]
    fn saving_twice_is_the_same_as_saving_once(
        entries in prop::collection::vec(entry_strategy(), 0..8),
    ) {
        let store = ObjectiveStore::new(Database::open_memory().unwrap());
        let date = day(0);
        store.save_for_date(date, &entries).unwrap();
        let once: Vec<_> = store.load_for_date(date).unwrap().entries().iter().map(content).collect();
        store.save_for_date(date, &entries).unwrap();
        let twice: Vec<_> = store.load_for_date(date).unwrap().entries().iter().map(content).collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn rates_stay_between_zero_and_one_hundred(
        entries in prop::collection::vec(entry_strategy(), 0..40),
    ) {
        for cat in category_breakdown(&entries) {
            prop_assert!(cat.total > 0);
            prop_assert!((0.0..=100.0).contains(&cat.a_rate));
            prop_assert!((0.0..=100.0).contains(&cat.b_rate));
        }
        let totals = summary(&entries);
        prop_assert_eq!(totals.entries as usize, entries.len());
        prop_assert!((0.0..=100.0).contains(&totals.a_rate));
        if totals.entries > 0 {
            let expected = f64::from(totals.a_done) * 100.0 / f64::from(totals.entries);
            prop_assert!((totals.a_rate - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn category_totals_add_up_to_the_window(
        entries in prop::collection::vec(entry_strategy(), 0..40),
    ) {
        let total: u32 = category_breakdown(&entries).iter().map(|c| c.total).sum();
        prop_assert_eq!(total as usize, entries.len());
        let rolled: u32 = daily_rollup(&entries).iter().map(|d| d.count).sum();
        prop_assert_eq!(rolled as usize, entries.len());
    }

    #[test]
    fn streaks_never_exceed_the_lookback(
        entries in prop::collection::vec(entry_strategy(), 0..60),
    ) {
        let rollup = daily_rollup(&entries);
        let s = streaks(&rollup);
        let cap = rollup.len().min(STREAK_LOOKBACK) as u32;
        prop_assert!(s.a <= cap);
        prop_assert!(s.b <= cap);
    }
}
