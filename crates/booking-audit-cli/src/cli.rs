//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// booking-audit: data quality report for booking records
#[derive(Parser)]
#[command(name = "booking-audit")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every data quality check on a file
    Audit {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,

        /// Reference date for future-date checks (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<String>,

        /// JSON configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Field delimiter (default: detected)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Type columns whose every value is a date as dates on load
        #[arg(long)]
        infer_dates: bool,
    },

    /// Show the role classification of a file's columns
    Roles {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}
