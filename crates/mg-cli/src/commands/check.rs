use std::path::Path;

pub fn run(path: &Path) -> Result<(), String> {
    let catalog = super::load_catalog(path, false)?;

    let total: f64 = catalog.iter().map(|m| m.time_limit).sum();
    println!("  All checks passed for '{}'.", path.display());
    println!(
        "  {} microgames, {total:.1}s of play per cycle",
        catalog.len()
    );

    Ok(())
}
