use checklist_core::Person;

use super::{display_name, open_dashboard, CmdResult, PersonArg};

pub fn check(label: &str, person: PersonArg, undo: bool, note: Option<&str>) -> CmdResult {
    let dash = open_dashboard()?;
    let person = Person::from(person);
    dash.record_check(label, person, !undo, note)?;
    let mark = if undo { "unchecked" } else { "checked" };
    println!("{mark} {label} for {}", display_name(dash.config(), person));
    Ok(())
}

pub fn note(label: &str, person: PersonArg, text: &str) -> CmdResult {
    let dash = open_dashboard()?;
    let person = Person::from(person);
    dash.set_note(label, person, text)?;
    println!("note saved on {label} for {}", display_name(dash.config(), person));
    Ok(())
}

pub fn add(label: &str, emoji: Option<&str>, category: Option<&str>) -> CmdResult {
    let dash = open_dashboard()?;
    let count = dash.add_objective(label, emoji, category)?;
    println!("added {} ({count} objectives today)", label.trim());
    Ok(())
}

pub fn remove(label: &str) -> CmdResult {
    let dash = open_dashboard()?;
    let count = dash.remove_objective(label)?;
    println!("removed {label} ({count} objectives today)");
    Ok(())
}

pub fn defaults() -> CmdResult {
    let dash = open_dashboard()?;
    let count = dash.add_default_objectives()?;
    println!("{count} objectives today");
    Ok(())
}

pub fn clear() -> CmdResult {
    let dash = open_dashboard()?;
    let deleted = dash.clear_today()?;
    println!("cleared {deleted} objectives");
    Ok(())
}
