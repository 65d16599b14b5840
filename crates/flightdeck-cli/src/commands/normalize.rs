//! Normalize command - canonicalize a raw report and export the records.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use flightdeck::normalize;

use crate::loader::load_table;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    timezone: Option<String>,
    verbose: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Normalizing".cyan().bold(),
        file.display().to_string().white()
    );

    let raw = load_table(&file)?;
    if verbose {
        println!();
        println!(
            "{} ({} columns, {} rows)",
            "Source layout".yellow().bold(),
            raw.column_count(),
            raw.row_count()
        );
        for name in raw.column_names() {
            println!("  {}", name);
        }
        println!();
    }

    let (canonical, counters) = normalize(&raw, timezone.as_deref());

    println!(
        "Processed {} rows ({} invalid, {} superseded duplicates)",
        counters.total.to_string().white().bold(),
        counters.invalid.to_string().red(),
        counters.duplicates.to_string().yellow()
    );

    let output_path = output.unwrap_or_else(|| {
        let mut p = file.clone();
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        p.set_file_name(format!("{}.normalized.json", stem));
        p
    });

    let payload = serde_json::to_string_pretty(&canonical.to_json_rows())?;
    fs::write(&output_path, payload)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(0)
}
