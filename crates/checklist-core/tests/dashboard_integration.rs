//! Integration tests for the dashboard over a file-backed database.
//!
//! Covers the day-to-day workflow (check objectives across several days,
//! then read the history back) and the content and settings round trips.

use chrono::NaiveDate;
use checklist_core::content::{demo_series, SERIES_LEN};
use checklist_core::objectives::DEFAULT_OBJECTIVES;
use checklist_core::{
    Config, ContentSeries, DailyContent, Dashboard, Database, ImportPayload, Person, SettingsStore,
    Today, UserMode, UserSettings,
};

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
}

fn dashboard_on(db: &Database, day: NaiveDate) -> Dashboard {
    Dashboard::new(db.clone(), Today::at(day), Config::default())
}

fn text(n: usize) -> DailyContent {
    DailyContent {
        original_text: format!("original {n}"),
        translated_text: format!("translated {n}"),
        source_reference: format!("ref {n}"),
    }
}

#[test]
fn test_week_of_checking_builds_streaks() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_at(dir.path().join("checklist.db"), 4).unwrap();

    // Three days where A finishes everything, B misses the middle one.
    for day in 15..=17 {
        let dash = dashboard_on(&db, date(10, day));
        dash.save_today(&[
            checklist_core::ObjectiveEntry::new(date(10, day), "Read"),
            checklist_core::ObjectiveEntry::new(date(10, day), "Walk"),
        ])
        .unwrap();
        for label in ["Read", "Walk"] {
            dash.set_completion(label, Person::A, true).unwrap();
            if day != 16 {
                dash.set_completion(label, Person::B, true).unwrap();
            }
        }
    }

    let report = dashboard_on(&db, date(10, 17)).report(30);
    assert_eq!(report.summary.days, 3);
    assert_eq!(report.summary.entries, 6);
    assert_eq!(report.streaks.a, 3);
    assert_eq!(report.streaks.b, 1);
    assert_eq!(report.series.len(), 3);
    assert_eq!(report.series[1].b_rate, 0.0);

    // A gap day is skipped, not counted as a broken day.
    let report = dashboard_on(&db, date(10, 19)).report(30);
    assert_eq!(report.streaks.a, 3);
}

#[test]
fn test_history_window_excludes_older_days() {
    let db = Database::open_memory().unwrap();
    for day in [1, 10, 19] {
        dashboard_on(&db, date(10, day)).add_default_objectives().unwrap();
    }

    let dash = dashboard_on(&db, date(10, 19));
    let last_ten = dash.history(10);
    assert!(last_ten.iter().all(|e| e.date >= date(10, 10)));
    assert_eq!(last_ten.len(), 2 * DEFAULT_OBJECTIVES.len());
    assert_eq!(last_ten[0].date, date(10, 19));
    assert_eq!(dash.history(30).len(), 3 * DEFAULT_OBJECTIVES.len());
}

#[test]
fn test_content_fallback_wraps_and_import_caps() {
    let db = Database::open_memory().unwrap();
    let dash = dashboard_on(&db, date(10, 19));

    let demo = demo_series(ContentSeries::Secondary);
    assert_eq!(dash.content_for_day(ContentSeries::Secondary, 1), demo[0]);
    assert_eq!(dash.content_for_day(ContentSeries::Secondary, 366), demo[0]);
    assert_eq!(dash.content_for_day(ContentSeries::Secondary, 0), demo[SERIES_LEN - 1]);

    let payload = ImportPayload {
        primary: (0..400).map(text).collect(),
        secondary: Vec::new(),
    };
    let summary = dash.import_content(&payload).unwrap();
    assert_eq!(summary.primary, SERIES_LEN);
    assert_eq!(summary.secondary, 0);
    assert_eq!(dash.content_for_day(ContentSeries::Primary, 1), text(0));
    assert_eq!(dash.content_for_day(ContentSeries::Primary, 365), text(364));
    // Past the end of the stored series, the fallback takes over.
    assert_eq!(
        dash.content_for_day(ContentSeries::Primary, 366),
        demo_series(ContentSeries::Primary)[0]
    );
}

#[test]
fn test_import_accepts_legacy_field_names() {
    let json = r#"{
        "hadiths": [{"arabic": "a", "french": "f", "reference": "r"}],
        "ayats": []
    }"#;
    let payload = ImportPayload::from_json(json).unwrap();
    assert_eq!(payload.primary.len(), 1);
    assert_eq!(payload.primary[0].translated_text, "f");

    let db = Database::open_memory().unwrap();
    let dash = dashboard_on(&db, date(1, 1));
    dash.import_content(&payload).unwrap();
    assert_eq!(dash.today_content().primary.source_reference, "r");
}

#[test]
fn test_seeding_is_idempotent() {
    let db = Database::open_memory().unwrap();
    let dash = dashboard_on(&db, date(10, 19));
    assert_eq!(dash.seed_content(), 2 * SERIES_LEN);
    assert_eq!(dash.seed_content(), 0);
}

#[test]
fn test_settings_stay_a_single_row() {
    let db = Database::open_memory().unwrap();
    let dash = dashboard_on(&db, date(10, 19));
    for mode in [UserMode::IndividualA, UserMode::Family, UserMode::IndividualB] {
        assert!(dash.save_settings(UserSettings {
            mode,
            show_a: true,
            show_b: true,
        }));
    }
    assert_eq!(SettingsStore::new(db.clone()).row_count().unwrap(), 1);
    assert_eq!(dash.settings().mode, UserMode::IndividualB);
}

#[test]
fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checklist.db");
    {
        let db = Database::open_at(&path, 2).unwrap();
        dashboard_on(&db, date(10, 19))
            .set_note("Meditation", Person::A, "ten minutes")
            .unwrap();
    }
    let db = Database::open_at(&path, 2).unwrap();
    assert!(db.schema_report().warnings.is_empty());
    let today = dashboard_on(&db, date(10, 19)).today_objectives();
    assert!(today.is_stored());
    let meditation = today
        .entries()
        .iter()
        .find(|e| e.label == "Meditation")
        .unwrap();
    assert_eq!(meditation.note_a, "ten minutes");
}

#[test]
fn test_concurrent_saves_leave_one_complete_set() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_at(dir.path().join("checklist.db"), 4).unwrap();
    let day = date(10, 19);

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let db = db.clone();
            std::thread::spawn(move || {
                let entries: Vec<_> = (0..5)
                    .map(|i| checklist_core::ObjectiveEntry::new(day, format!("writer {n} item {i}")))
                    .collect();
                dashboard_on(&db, day).save_today(&entries).unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 5);
    }

    // Last write wins as a whole: all five labels come from one writer.
    let entries = dashboard_on(&db, day).today_objectives().into_entries();
    assert_eq!(entries.len(), 5);
    let writer = entries[0].label.split(" item").next().unwrap().to_string();
    assert!(entries.iter().all(|e| e.label.starts_with(&writer)));
}
