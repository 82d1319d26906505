//! Explicit logging context
//!
//! Components never reach for an ambient "current run". The runner creates
//! a [`LogContext`] per run and hands it to everything it drives; each
//! component opens its spans as children of the run span, so every log line
//! can be traced back to the run that produced it.

use std::path::Path;
use tracing::{info_span, Span};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct LogContext {
    span: Span,
}

impl LogContext {
    /// Start a new run with a fresh identifier
    pub fn new_run() -> Self {
        let run_id = Uuid::new_v4();
        Self {
            span: info_span!("ingest_run", run_id = %run_id),
        }
    }

    /// A context not tied to any run, for one-off operations
    pub fn detached() -> Self {
        Self { span: Span::none() }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn file_span(&self, path: &Path, data_type: &str) -> Span {
        info_span!(
            parent: &self.span,
            "process_file",
            file = %path.display(),
            data_type = data_type
        )
    }

    pub fn quarantine_span(&self, path: &Path) -> Span {
        info_span!(parent: &self.span, "quarantine", file = %path.display())
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::detached()
    }
}
