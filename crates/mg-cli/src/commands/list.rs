use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(path: &Path) -> Result<(), String> {
    let catalog = super::load_catalog(path, false)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Scene", "Command", "Time Limit", "Unlocked"]);

    for microgame in &catalog {
        let limit = format!("{:.1}s", microgame.time_limit);
        let unlocked = if microgame.unlocked { "yes" } else { "no" };
        table.add_row(vec![
            microgame.scene.as_str(),
            microgame.command.as_str(),
            limit.as_str(),
            unlocked,
        ]);
    }

    let unlocked = catalog.iter().filter(|m| m.unlocked).count();
    println!("{table}");
    println!();
    println!("  {} microgames, {unlocked} unlocked", catalog.len());

    Ok(())
}
