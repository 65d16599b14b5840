//! Flightdeck CLI - canonicalize and validate flight-activity reports.

mod cli;
mod commands;
mod loader;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Normalize {
            file,
            output,
            timezone,
        } => commands::normalize::run(file, output, timezone, cli.verbose),

        Commands::Validate {
            file,
            timezone,
            dataset_version,
            output,
            dry_run,
        } => commands::validate::run(file, timezone, dataset_version, output, dry_run, cli.verbose),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
