use std::path::Path;

use checklist_core::{ContentSeries, DailyContent, ImportPayload, TodayContent};

use super::{open_dashboard, CmdResult};

pub fn show(day: Option<u32>, json: bool) -> CmdResult {
    let dash = open_dashboard()?;
    let content = match day {
        None => dash.today_content(),
        Some(day) => TodayContent {
            day_of_year: day,
            primary: dash.content_for_day(ContentSeries::Primary, day),
            secondary: dash.content_for_day(ContentSeries::Secondary, day),
        },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&content)?);
        return Ok(());
    }

    println!("Day {}", content.day_of_year);
    print_text(&content.primary);
    println!();
    print_text(&content.secondary);
    Ok(())
}

fn print_text(text: &DailyContent) {
    println!("  {}", text.original_text);
    println!("  {}", text.translated_text);
    println!("  ({})", text.source_reference);
}

pub fn import(file: &Path) -> CmdResult {
    let raw = std::fs::read_to_string(file)?;
    let payload = ImportPayload::from_json(&raw)?;
    let dash = open_dashboard()?;
    let summary = dash.import_content(&payload)?;
    println!(
        "imported {} primary and {} secondary texts",
        summary.primary, summary.secondary
    );
    Ok(())
}
