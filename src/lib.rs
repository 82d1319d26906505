//! # retail-ingest
//!
//! Fail-fast ingestion for retail CSV feeds. Each input file is checked
//! against a schema contract and its business rules before anything
//! downstream sees it: accepted files get a validated copy stamped with
//! ingestion metadata, rejected files are moved to quarantine next to a
//! record of why.
//!
//! ## Usage
//!
//! ```bash
//! retail-ingest run --data-dir ./data
//! retail-ingest status
//! ```
//!
//! ## Modules
//!
//! - `app` - Logging setup and fatal error reporting
//! - `cli` - Command-line parsing and subcommand handlers
//! - `config` - Layered pipeline configuration
//! - `context` - Per-run logging context handed to components
//! - `contract` - Schema contracts, business rules and the validator registry
//! - `dataset` - In-memory tabular data with inferred cell types
//! - `error` - Error types with codes and exit statuses
//! - `pipeline` - File processor, runner, results and run summary
//! - `quarantine` - Relocation of rejected files with sidecar records
//! - `storage` - CSV load and save, quality report and backups
pub mod app;
pub mod cli;
pub mod config;
pub mod context;
pub mod contract;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod quarantine;
pub mod storage;


pub use contract::{ContractRegistry, DataType, Validator};
pub use dataset::{Dataset, Value};
pub use error::{IngestError, Result};
pub use pipeline::{run_pipeline, PipelineRunner, PipelineSummary, ProcessingResult};
