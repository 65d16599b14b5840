//! Validate command - normalize a report and run the quality suite.

use std::path::PathBuf;

use chrono::Utc;
use colored::Colorize;
use flightdeck::{CheckRegistry, CheckStatus, normalize, validate};

use crate::loader::load_table;

pub fn run(
    file: PathBuf,
    timezone: Option<String>,
    dataset_version: Option<String>,
    output: Option<PathBuf>,
    dry_run: bool,
    verbose: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Validating".cyan().bold(),
        file.display().to_string().white()
    );

    let raw = load_table(&file)?;
    let (canonical, counters) = normalize(&raw, timezone.as_deref());
    println!(
        "Processed {} rows ({} invalid, {} superseded duplicates)",
        counters.total.to_string().white().bold(),
        counters.invalid.to_string().red(),
        counters.duplicates.to_string().yellow()
    );

    let registry = CheckRegistry::default_suite();
    let report = validate(&canonical, &registry, dataset_version.as_deref());

    println!();
    for check in &report.checks {
        let label = match check.status {
            CheckStatus::Ok => "OK  ".green().bold(),
            CheckStatus::Warn => "WARN".yellow().bold(),
            CheckStatus::Fail => "FAIL".red().bold(),
        };
        println!("  {} {:24} {}", label, check.name, check.summary);
        if verbose {
            if let Some(details) = &check.details {
                println!("       {}", details);
            }
        }
    }

    println!();
    let status_line = match report.status {
        CheckStatus::Ok => report.dataset_status().green().bold(),
        CheckStatus::Warn => report.dataset_status().yellow().bold(),
        CheckStatus::Fail => report.dataset_status().red().bold(),
    };
    println!(
        "Dataset status: {} ({} warnings, {} failures)",
        status_line, report.warn_count, report.fail_count
    );

    if !dry_run {
        let output_path = output.unwrap_or_else(|| {
            let tag = dataset_version
                .clone()
                .unwrap_or_else(|| Utc::now().format("%Y%m%dT%H%M%SZ").to_string());
            PathBuf::from(format!("quality_report_{}.json", tag))
        });
        report.save(&output_path)?;
        println!(
            "{} {}",
            "Report written to".green().bold(),
            output_path.display().to_string().white()
        );
    }

    Ok(if report.status == CheckStatus::Fail { 1 } else { 0 })
}
