use checklist_core::calendar::format_long_date;
use checklist_core::{DayProgress, ObjectiveEntry, Person};

use super::{display_name, open_dashboard, CmdResult};

pub fn init() -> CmdResult {
    let dash = open_dashboard()?;
    let report = dash.database().schema_report();
    let seeded = dash.seed_content();

    if let Some(path) = dash.database().path() {
        println!("database: {}", path.display());
    }
    for table in &report.created_tables {
        println!("created table {table}");
    }
    for column in &report.added_columns {
        println!("added column {column}");
    }
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    if seeded > 0 {
        println!("seeded {seeded} daily texts");
    }
    println!("ready");
    Ok(())
}

pub fn show(json: bool) -> CmdResult {
    let dash = open_dashboard()?;
    let today = dash.today();
    let objectives = dash.today_objectives();
    let progress = DayProgress::from_entries(objectives.entries());
    let settings = dash.settings();

    if json {
        let value = serde_json::json!({
            "today": today,
            "stored": objectives.is_stored(),
            "progress": progress,
            "settings": settings,
            "objectives": objectives.entries(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let config = dash.config();
    let visible: Vec<Person> = Person::BOTH
        .into_iter()
        .filter(|p| settings.shows(*p))
        .collect();

    println!(
        "{} (week {}, day {})",
        format_long_date(today.date),
        today.iso_week,
        today.day_of_year
    );
    let header: Vec<String> = visible
        .iter()
        .map(|p| {
            let (done, percent) = match p {
                Person::A => (progress.a_done, progress.a_percent),
                Person::B => (progress.b_done, progress.b_percent),
            };
            format!("{} {done}/{} ({percent}%)", display_name(config, *p), progress.total)
        })
        .collect();
    println!("{}", header.join("   "));
    if !objectives.is_stored() {
        println!("(default list, not saved yet)");
    }
    println!();
    for entry in objectives.entries() {
        println!("{}", render_line(entry, &visible));
    }
    Ok(())
}

fn render_line(entry: &ObjectiveEntry, visible: &[Person]) -> String {
    let boxes: String = visible
        .iter()
        .map(|p| if entry.completed_by(*p) { "[x] " } else { "[ ] " })
        .collect();
    let mut line = format!("{boxes}{} {} ({})", entry.emoji, entry.label, entry.category);
    for p in visible {
        let note = entry.note(*p);
        if !note.is_empty() {
            line.push_str(&format!("\n      {}: {note}", p.as_str()));
        }
    }
    line
}
