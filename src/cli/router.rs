//! Command routing and execution

use crate::cli::args::{Cli, Commands};
use crate::cli::commands::*;
use crate::config::{load_config, IngestConfig};
use anyhow::{Context, Result};
use std::path::Path;

/// Execute the parsed command line
///
/// With no subcommand the pipeline runs with configured defaults.
pub fn execute_command(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or_default();
    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = resolve_config(cli.config.as_deref(), &working_dir, &command)?;

    match command {
        Commands::Run { .. } => run_pipeline_command(config),
        Commands::Status { .. } => run_status_command(&config),
        Commands::Quality { file, ranges, json } => run_quality_command(&file, &ranges, json),
        Commands::Backup { file, .. } => run_backup_command(&file, &config),
    }
}

fn resolve_config(
    config_path: Option<&Path>,
    working_dir: &Path,
    command: &Commands,
) -> Result<IngestConfig> {
    Ok(load_config(
        config_path,
        working_dir,
        &command.config_overrides(),
    )?)
}
