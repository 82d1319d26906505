//! CLI argument structures

use crate::config::ConfigOverrides;
use crate::storage::RangeRule;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Validate retail CSV feeds and quarantine what fails
#[derive(Parser)]
#[command(name = "retail-ingest")]
#[command(about = "retail-ingest - Validate retail data feeds before they reach reporting", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a TOML configuration file (defaults to ./ingest.toml if present)
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the ingestion pipeline over the data directory (default command)
    #[command(name = "run")]
    Run {
        /// Directory containing the input CSV files
        #[arg(short = 'd', long, value_name = "DIR")]
        data_dir: Option<PathBuf>,

        /// Where to write the run summary
        #[arg(short = 's', long, value_name = "FILE")]
        summary: Option<PathBuf>,

        /// Directory for rejected files (defaults to <data-dir>/quarantine)
        #[arg(short = 'q', long, value_name = "DIR")]
        quarantine_dir: Option<PathBuf>,
    },

    /// Show the outcome of the last pipeline run
    #[command(name = "status")]
    Status {
        /// Run summary to read
        #[arg(short = 's', long, value_name = "FILE")]
        summary: Option<PathBuf>,
    },

    /// Print a data-quality report for a CSV file
    #[command(name = "quality")]
    Quality {
        /// CSV file to inspect
        file: PathBuf,

        /// Expected range for a numeric column, as column=min:max
        #[arg(short = 'r', long = "range", value_name = "RULE")]
        ranges: Vec<RangeRule>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Copy a file into the backup directory under a timestamped name
    #[command(name = "backup")]
    Backup {
        /// File to back up
        file: PathBuf,

        /// Backup directory
        #[arg(short = 'b', long, value_name = "DIR")]
        backup_dir: Option<PathBuf>,
    },
}

impl Commands {
    /// Command-line values that override the configuration file
    pub fn config_overrides(&self) -> ConfigOverrides {
        match self {
            Commands::Run {
                data_dir,
                summary,
                quarantine_dir,
            } => ConfigOverrides {
                data_dir: data_dir.clone(),
                quarantine_dir: quarantine_dir.clone(),
                summary_path: summary.clone(),
                backup_dir: None,
            },
            Commands::Status { summary } => ConfigOverrides {
                summary_path: summary.clone(),
                ..ConfigOverrides::default()
            },
            Commands::Backup { backup_dir, .. } => ConfigOverrides {
                backup_dir: backup_dir.clone(),
                ..ConfigOverrides::default()
            },
            Commands::Quality { .. } => ConfigOverrides::default(),
        }
    }
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run {
            data_dir: None,
            summary: None,
            quarantine_dir: None,
        }
    }
}
