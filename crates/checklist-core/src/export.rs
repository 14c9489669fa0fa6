//! Export of objective history as CSV and as a Markdown summary.

use chrono::NaiveDate;
use std::fmt::Write as _;

use crate::calendar::format_long_date;
use crate::objectives::ObjectiveEntry;
use crate::stats::HistoryReport;
use crate::storage::PeopleConfig;

const CSV_HEADER: &str =
    "id,date,label,emoji,category,completed_by_a,completed_by_b,note_a,note_b,iso_week";

/// Default file name for a CSV export made on `date`.
pub fn csv_file_name(date: NaiveDate) -> String {
    format!("checklist_export_{date}.csv")
}

/// Default file name for a summary report made on `date`.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("checklist_report_{date}.md")
}

/// Render entries as CSV, one row per entry in the given order.
pub fn to_csv(entries: &[ObjectiveEntry]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + entries.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for e in entries {
        let fields = [
            e.id.map(|id| id.to_string()).unwrap_or_default(),
            e.date.to_string(),
            csv_field(&e.label),
            csv_field(&e.emoji),
            csv_field(&e.category),
            e.completed_by_a.to_string(),
            e.completed_by_b.to_string(),
            csv_field(&e.note_a),
            csv_field(&e.note_b),
            e.iso_week.map(|w| w.to_string()).unwrap_or_default(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Inputs of the Markdown summary report.
pub struct ReportContext<'a> {
    /// Length of the window the report covers.
    pub period_days: u32,
    pub generated_on: NaiveDate,
    pub people: &'a PeopleConfig,
    pub report: &'a HistoryReport,
}

/// Render the human-readable summary document.
pub fn summary_report(ctx: &ReportContext<'_>) -> String {
    let summary = &ctx.report.summary;
    let a = &ctx.people.a_name;
    let b = &ctx.people.b_name;

    let mut out = String::new();
    let _ = writeln!(out, "# Checklist report");
    let _ = writeln!(out, "**Period:** last {} days", ctx.period_days);
    let _ = writeln!(out, "**Generated on:** {}", format_long_date(ctx.generated_on));
    let _ = writeln!(out);
    let _ = writeln!(out, "## Summary");
    let _ = writeln!(out, "- **Days analysed:** {}", summary.days);
    let _ = writeln!(out, "- **Total objectives:** {}", summary.entries);
    let _ = writeln!(out, "- **{a} success rate:** {:.1}%", summary.a_rate);
    let _ = writeln!(out, "- **{b} success rate:** {:.1}%", summary.b_rate);
    let _ = writeln!(out);
    let _ = writeln!(out, "## By category");
    for cat in &ctx.report.categories {
        let _ = writeln!(
            out,
            "- **{}:** {a} {:.1}% - {b} {:.1}%",
            title_case(&cat.category),
            cat.a_rate,
            cat.b_rate
        );
    }
    out
}

/// Capitalise the first letter of every word, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut start_of_word = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if start_of_word {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            start_of_word = false;
        } else {
            out.push(c);
            start_of_word = true;
        }
    }
    out
}
