//! Dataset storage helpers
//!
//! Stateless utilities for moving datasets between CSV files and memory,
//! plus the column check, quality report and timestamped backup used ad hoc
//! by operators. Loading is the one operation that reports failure through
//! an error; the save and backup helpers log and return a plain outcome.

pub mod backup;
pub mod error;
pub mod quality;


pub use backup::backup_file;
pub use error::{StorageError, StorageResult};
pub use quality::{quality_report, QualityReport, RangeRule, ValueRange};

use crate::dataset::{Dataset, Value};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Timestamp layout used in quarantine, backup and batch names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Load a CSV file into a dataset
pub fn load_dataset(path: &Path) -> StorageResult<Dataset> {
    if !path.exists() {
        error!(path = %path.display(), "File not found");
        return Err(StorageError::NotFound(path.to_path_buf()));
    }

    let dataset = read_csv(path).inspect_err(|e| {
        error!(path = %path.display(), error = %e, "Failed to load file");
    })?;

    info!(path = %path.display(), rows = dataset.len(), "Loaded dataset");
    Ok(dataset)
}

fn read_csv(path: &Path) -> StorageResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| StorageError::parse(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| StorageError::parse(path, e))?
        .clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(StorageError::parse(path, "No columns to parse from file"));
    }

    let mut dataset = Dataset::new(headers.iter()).map_err(|column| {
        StorageError::DuplicateColumn {
            path: path.to_path_buf(),
            column,
        }
    })?;

    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| StorageError::parse(path, e))?;
        if record.len() > headers.len() {
            return Err(StorageError::parse(
                path,
                format!(
                    "Expected {} fields in line {}, saw {}",
                    headers.len(),
                    idx + 2,
                    record.len()
                ),
            ));
        }
        dataset.push_row(record.iter().map(Value::parse).collect());
    }

    Ok(dataset)
}

/// Write a dataset as CSV, creating parent directories as needed
pub fn write_dataset(dataset: &Dataset, path: &Path) -> StorageResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let to_write_error = |source: csv::Error| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(to_write_error)?;
    writer
        .write_record(dataset.columns())
        .map_err(to_write_error)?;
    for row in dataset.rows() {
        writer
            .write_record(row.iter().map(Value::to_csv_field))
            .map_err(to_write_error)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save a dataset, reporting success as a boolean
pub fn save_dataset(dataset: &Dataset, path: &Path) -> bool {
    match write_dataset(dataset, path) {
        Ok(()) => {
            info!(path = %path.display(), rows = dataset.len(), "Saved dataset");
            true
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to save dataset");
            false
        }
    }
}

/// Check that every required column is present
///
/// Returns the missing columns in the order they were requested.
pub fn check_columns(dataset: &Dataset, required: &[&str]) -> (bool, Vec<String>) {
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !dataset.has_column(col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        debug!("All required columns present");
        (true, missing)
    } else {
        warn!(?missing, "Missing columns");
        (false, missing)
    }
}

/// Pick a `<timestamp>_<file_name>` path inside `dir` that is not taken yet
///
/// Two operations in the same second would otherwise collide, so a taken
/// name gets a counter appended to the timestamp: `<timestamp>-1_<file_name>`.
pub fn timestamped_path(dir: &Path, file_name: &str, at: DateTime<Utc>) -> PathBuf {
    let stamp = at.format(TIMESTAMP_FORMAT).to_string();
    let mut candidate = dir.join(format!("{}_{}", stamp, file_name));
    let mut counter = 1;
    while candidate.exists() {
        candidate = dir.join(format!("{}-{}_{}", stamp, counter, file_name));
        counter += 1;
    }
    candidate
}

/// Path of the validated copy for an input file: `<stem>_validated<.ext>`
pub fn validated_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{}_validated.{}", stem, ext.to_string_lossy()),
        None => format!("{}_validated", stem),
    };
    path.with_file_name(file_name)
}
