//! Single-file lifecycle: load, validate, then stamp-and-write or quarantine

use super::result::ProcessingResult;
use crate::context::LogContext;
use crate::contract::{ContractRegistry, DataType};
use crate::dataset::{Dataset, Value};
use crate::quarantine::QuarantineManager;
use crate::storage::{self, TIMESTAMP_FORMAT};
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::Path;
use tracing::{error, info};

pub const INGESTED_AT_COLUMN: &str = "_ingested_at";
pub const BATCH_ID_COLUMN: &str = "_batch_id";

/// Runs one input file through its contract
///
/// Every failure mode ends up in the returned [`ProcessingResult`]; nothing
/// here returns an error or panics on bad input.
pub struct FileProcessor<'a> {
    registry: &'a ContractRegistry,
    quarantine: &'a QuarantineManager,
    log: &'a LogContext,
}

impl<'a> FileProcessor<'a> {
    pub fn new(
        registry: &'a ContractRegistry,
        quarantine: &'a QuarantineManager,
        log: &'a LogContext,
    ) -> Self {
        Self {
            registry,
            quarantine,
            log,
        }
    }

    pub fn process(&self, path: &Path, data_type: DataType) -> ProcessingResult {
        let span = self.log.file_span(path, data_type.as_str());
        let _guard = span.enter();
        info!("Processing file");

        let mut dataset = match storage::load_dataset(path) {
            Ok(dataset) => dataset,
            Err(e) => return self.abort(path, e.to_string()),
        };
        info!(records = dataset.len(), "Loaded records");

        let validation = self.registry.validate(&dataset, data_type);
        if !validation.is_valid() {
            let errors = validation.messages();
            error!(?errors, "Validation failed");
            let quarantine_path = self.quarantine.quarantine(path, &errors);
            return ProcessingResult::validation_failed(errors, quarantine_path);
        }

        stamp_metadata(&mut dataset, Utc::now());

        let validated_path = storage::validated_path(path);
        if let Err(e) = storage::write_dataset(&dataset, &validated_path) {
            return self.abort(path, e.to_string());
        }

        info!(
            records = dataset.len(),
            output = %validated_path.display(),
            "Successfully processed file"
        );
        ProcessingResult::Success {
            records: dataset.len(),
            validated_path,
        }
    }

    fn abort(&self, path: &Path, message: String) -> ProcessingResult {
        error!(error = %message, "Failed to process file");
        let quarantine_path = self.quarantine.quarantine(path, std::slice::from_ref(&message));
        ProcessingResult::error(message, quarantine_path)
    }
}

/// Stamp the ingestion time and batch id onto every row
///
/// Both values come from the same instant, so every row of one call shares
/// one batch id. Existing metadata columns are overwritten.
pub fn stamp_metadata(dataset: &mut Dataset, at: DateTime<Utc>) {
    dataset.set_column(
        INGESTED_AT_COLUMN,
        Value::Text(at.to_rfc3339_opts(SecondsFormat::Micros, true)),
    );
    dataset.set_column(
        BATCH_ID_COLUMN,
        Value::Text(at.format(TIMESTAMP_FORMAT).to_string()),
    );
}
