use super::{open_dashboard, CmdResult};

/// Delete all objective history. Requires both flags.
pub fn run(yes: bool, confirm: bool) -> CmdResult {
    if !(yes && confirm) {
        return Err("reset deletes all objective history; pass both --yes and --confirm".into());
    }
    let dash = open_dashboard()?;
    let deleted = dash.reset_all_data()?;
    println!("deleted {deleted} objectives");
    Ok(())
}
