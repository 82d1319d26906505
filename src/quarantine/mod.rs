//! Quarantine for rejected input files
//!
//! A quarantined file is moved (never copied) out of the data directory to
//! `<quarantine_dir>/<timestamp>_<file name>`, and a sidecar
//! `<quarantine path>.errors.json` records why. The move and the sidecar go
//! together: if the record cannot be written, the file is moved back.
//!
//! Quarantine is best effort. When it fails, the failure is logged and the
//! caller gets the original path back; a run never aborts because a file
//! could not be isolated.

use crate::context::LogContext;
use crate::storage::timestamped_path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Sidecar record describing why a file was quarantined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarantineRecord {
    pub original_path: PathBuf,
    pub quarantine_path: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub errors: Vec<String>,
}

impl QuarantineRecord {
    /// Read a sidecar record back from disk
    pub fn load(sidecar: &Path) -> Result<Self, QuarantineError> {
        let contents = fs::read_to_string(sidecar).map_err(|source| QuarantineError::Record {
            path: sidecar.to_path_buf(),
            source: source.into(),
        })?;
        serde_json::from_str(&contents).map_err(|source| QuarantineError::Record {
            path: sidecar.to_path_buf(),
            source: source.into(),
        })
    }
}

#[derive(Debug, Error)]
pub enum QuarantineError {
    #[error("cannot quarantine {}: path has no file name", .0.display())]
    NoFileName(PathBuf),

    #[error("failed to create quarantine directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to move {} to {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write quarantine record {}: {source}", path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Moves rejected files into the quarantine directory
#[derive(Debug, Clone)]
pub struct QuarantineManager {
    dir: PathBuf,
    log: LogContext,
}

impl QuarantineManager {
    pub fn new(dir: impl Into<PathBuf>, log: LogContext) -> Self {
        Self {
            dir: dir.into(),
            log,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Sidecar location for a quarantined file
    pub fn sidecar_path(quarantine_path: &Path) -> PathBuf {
        let mut name = quarantine_path.as_os_str().to_owned();
        name.push(".errors.json");
        PathBuf::from(name)
    }

    /// Quarantine `path`, returning where it went
    ///
    /// Falls back to returning `path` unchanged if anything goes wrong.
    pub fn quarantine(&self, path: &Path, errors: &[String]) -> PathBuf {
        match self.try_quarantine(path, errors) {
            Ok(record) => record.quarantine_path,
            Err(e) => {
                error!(parent: self.log.span(), file = %path.display(), error = %e, "Failed to quarantine file");
                path.to_path_buf()
            }
        }
    }

    /// Quarantine `path`, reporting failures to the caller
    pub fn try_quarantine(
        &self,
        path: &Path,
        errors: &[String],
    ) -> Result<QuarantineRecord, QuarantineError> {
        let _span = self.log.quarantine_span(path).entered();

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| QuarantineError::NoFileName(path.to_path_buf()))?;

        fs::create_dir_all(&self.dir).map_err(|source| QuarantineError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let now = Utc::now();
        let quarantine_path = timestamped_path(&self.dir, &file_name, now);

        move_file(path, &quarantine_path).map_err(|source| QuarantineError::Move {
            from: path.to_path_buf(),
            to: quarantine_path.clone(),
            source,
        })?;

        let record = QuarantineRecord {
            original_path: path.to_path_buf(),
            quarantine_path: quarantine_path.clone(),
            timestamp: now,
            errors: errors.to_vec(),
        };

        if let Err(e) = write_record(&record) {
            // keep the file and its record together: undo the move
            if let Err(restore) = move_file(&quarantine_path, path) {
                error!(
                    file = %quarantine_path.display(),
                    error = %restore,
                    "Failed to restore file after quarantine record failure"
                );
            }
            return Err(e);
        }

        warn!(
            from = %path.display(),
            to = %quarantine_path.display(),
            errors = errors.len(),
            "File quarantined"
        );
        Ok(record)
    }
}

fn write_record(record: &QuarantineRecord) -> Result<(), QuarantineError> {
    let sidecar = QuarantineManager::sidecar_path(&record.quarantine_path);
    let to_error = |source: Box<dyn std::error::Error + Send + Sync>| QuarantineError::Record {
        path: sidecar.clone(),
        source,
    };

    let json = serde_json::to_string_pretty(record).map_err(|e| to_error(e.into()))?;
    fs::write(&sidecar, json).map_err(|e| to_error(e.into()))?;
    debug!(sidecar = %sidecar.display(), "Wrote quarantine record");
    Ok(())
}

/// Rename, falling back to copy-and-delete across filesystems
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if !from.is_file() {
                return Err(rename_err);
            }
            copy_then_remove(from, to)
        }
    }
}

/// Copy `from` to `to`, then delete `from`; on any failure nothing is left at `to`
fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    let moved = fs::copy(from, to).and_then(|_| fs::remove_file(from));
    if moved.is_err() {
        let _ = fs::remove_file(to);
    }
    moved
}
