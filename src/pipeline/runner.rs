//! Drives the configured files through the processor and records the run

use super::processor::FileProcessor;
use super::report::render_report;
use super::result::ProcessingResult;
use super::summary::{PipelineSummary, RunResults};
use crate::config::IngestConfig;
use crate::context::LogContext;
use crate::contract::{ContractRegistry, DataType};
use crate::error::Result;
use crate::quarantine::QuarantineManager;
use chrono::Utc;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// One input file the runner looks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub file_name: String,
    pub data_type: DataType,
}

impl FileSpec {
    pub fn new(file_name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            file_name: file_name.into(),
            data_type,
        }
    }
}

/// The retail feed, in processing order
pub fn default_files() -> Vec<FileSpec> {
    vec![
        FileSpec::new("stores.csv", DataType::Stores),
        FileSpec::new("daily_sales.csv", DataType::Sales),
        FileSpec::new("inventory_snapshots.csv", DataType::Inventory),
        FileSpec::new("promotions.csv", DataType::Promotions),
    ]
}

pub struct PipelineRunner {
    config: IngestConfig,
    registry: ContractRegistry,
    files: Vec<FileSpec>,
}

impl PipelineRunner {
    pub fn new(config: IngestConfig) -> Self {
        Self {
            config,
            registry: ContractRegistry::standard(),
            files: default_files(),
        }
    }

    pub fn with_registry(mut self, registry: ContractRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_files(mut self, files: Vec<FileSpec>) -> Self {
        self.files = files;
        self
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Process every configured file without persisting anything about the run
    ///
    /// Per-file failures are captured in the summary; this never fails.
    pub fn execute(&self, log: &LogContext) -> PipelineSummary {
        let _run = log.span().enter();
        let started = Instant::now();
        info!(data_dir = %self.config.data_dir.display(), "Starting pipeline run");

        let quarantine = QuarantineManager::new(self.config.quarantine_dir(), log.clone());
        let processor = FileProcessor::new(&self.registry, &quarantine, log);

        let mut results = RunResults::new();
        for file in &self.files {
            let path = self.config.data_file(&file.file_name);
            let result = if path.exists() {
                processor.process(&path, file.data_type)
            } else {
                warn!(file = %path.display(), "File not found, skipping");
                ProcessingResult::file_not_found()
            };
            results.insert(file.file_name.clone(), result);
        }

        // stamped when the run completes
        let summary = PipelineSummary::new(results, Utc::now(), started.elapsed().as_secs_f64());
        info!(
            files_processed = summary.files_processed,
            records_processed = summary.records_processed,
            duration_seconds = summary.duration_seconds,
            "Pipeline run finished"
        );
        summary
    }

    /// Run, persist the summary, then write the report to `out`
    ///
    /// Failing to save the summary or write the report is the only error.
    pub fn run_with_output<W: Write>(&self, log: &LogContext, out: &mut W) -> Result<PipelineSummary> {
        let summary = self.execute(log);
        summary.save(self.config.summary_path())?;
        out.write_all(render_report(&summary, self.config.summary_path()).as_bytes())?;
        out.flush()?;
        Ok(summary)
    }

    /// Run with a fresh run context, reporting to stdout
    pub fn run(&self) -> Result<PipelineSummary> {
        let log = LogContext::new_run();
        self.run_with_output(&log, &mut io::stdout().lock())
    }
}

/// Run the standard pipeline over `data_dir` with default settings otherwise
pub fn run_pipeline(data_dir: impl AsRef<Path>) -> Result<PipelineSummary> {
    PipelineRunner::new(IngestConfig::default().with_data_dir(data_dir.as_ref())).run()
}
