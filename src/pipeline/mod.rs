//! The ingestion pipeline
//!
//! [`PipelineRunner`] walks a fixed, ordered list of input files. Each file
//! present goes through [`FileProcessor`]: it is loaded, checked against its
//! contract, and then either written out as a validated copy with
//! `_ingested_at` and `_batch_id` columns or moved to quarantine. Missing
//! files are skipped. Every outcome is a [`ProcessingResult`]; the run as a
//! whole becomes a [`PipelineSummary`] persisted as JSON.
//!
//! One file's failure never stops the files after it. The only error a run
//! can surface is failing to persist or print the summary.

pub mod processor;
pub mod report;
pub mod result;
pub mod runner;
pub mod summary;


pub use processor::{stamp_metadata, FileProcessor, BATCH_ID_COLUMN, INGESTED_AT_COLUMN};
pub use report::{render_report, with_thousands};
pub use result::{FailureReason, ProcessingResult, SkipReason, Status};
pub use runner::{default_files, run_pipeline, FileSpec, PipelineRunner};
pub use summary::{PipelineSummary, ResultView, RunResults, SummaryView};
