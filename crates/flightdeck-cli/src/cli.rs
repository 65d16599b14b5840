//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flightdeck: canonicalize and validate flight-activity reports
#[derive(Parser)]
#[command(name = "flightdeck")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a raw report into the canonical record schema
    Normalize {
        /// Path to the raw report (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for canonical records (default: <file>.normalized.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// IANA timezone applied to timestamps without an explicit offset
        #[arg(short, long)]
        timezone: Option<String>,
    },

    /// Normalize a raw report and run the quality check suite
    Validate {
        /// Path to the raw report (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// IANA timezone applied to timestamps without an explicit offset
        #[arg(short, long)]
        timezone: Option<String>,

        /// Dataset version token echoed into the report
        #[arg(short = 'd', long)]
        dataset_version: Option<String>,

        /// Output path for the quality report (default: quality_report_<version>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the verdict without writing a report file
        #[arg(long)]
        dry_run: bool,
    },
}
