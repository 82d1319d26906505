//! Run command implementation

use crate::config::IngestConfig;
use crate::pipeline::PipelineRunner;
use anyhow::Result;
use tracing::debug;

/// Execute the pipeline and print its report
///
/// File-level failures are part of a normal run and do not change the exit
/// status; only failing to save the summary does.
pub fn run_pipeline_command(config: IngestConfig) -> Result<()> {
    let summary = PipelineRunner::new(config).run()?;
    debug!(
        files_processed = summary.files_processed,
        records_processed = summary.records_processed,
        "Run command finished"
    );
    Ok(())
}
