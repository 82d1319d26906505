//! Per-file processing outcomes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    ValidationFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    FileNotFound,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::ValidationFailed => f.write_str("validation_failed"),
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FileNotFound => f.write_str("file_not_found"),
        }
    }
}

/// What happened to one configured file during a run
///
/// Serialized with an internal `status` tag, which is the field summary
/// readers key on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessingResult {
    /// Validated and written out with ingestion metadata
    Success {
        records: usize,
        validated_path: PathBuf,
    },
    /// Loaded, but rejected by its contract
    Failed {
        reason: FailureReason,
        errors: Vec<String>,
        quarantine_path: PathBuf,
    },
    /// Could not be loaded or written
    Error {
        reason: String,
        #[serde(default)]
        errors: Vec<String>,
        quarantine_path: PathBuf,
    },
    /// Never looked at
    Skipped { reason: SkipReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failed,
    Error,
    Skipped,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Success => "success",
            Status::Failed => "failed",
            Status::Error => "error",
            Status::Skipped => "skipped",
        })
    }
}

impl ProcessingResult {
    pub fn validation_failed(errors: Vec<String>, quarantine_path: PathBuf) -> Self {
        Self::Failed {
            reason: FailureReason::ValidationFailed,
            errors,
            quarantine_path,
        }
    }

    /// An unexpected failure; the message doubles as the only error
    pub fn error(message: impl Into<String>, quarantine_path: PathBuf) -> Self {
        let message = message.into();
        Self::Error {
            errors: vec![message.clone()],
            reason: message,
            quarantine_path,
        }
    }

    pub fn file_not_found() -> Self {
        Self::Skipped {
            reason: SkipReason::FileNotFound,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Success { .. } => Status::Success,
            Self::Failed { .. } => Status::Failed,
            Self::Error { .. } => Status::Error,
            Self::Skipped { .. } => Status::Skipped,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Records ingested; zero for anything but success
    pub fn records(&self) -> usize {
        match self {
            Self::Success { records, .. } => *records,
            _ => 0,
        }
    }

    /// Short reason for a non-success outcome
    pub fn reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::Failed { reason, .. } => Some(reason.to_string()),
            Self::Error { reason, .. } => Some(reason.clone()),
            Self::Skipped { reason } => Some(reason.to_string()),
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            Self::Failed { errors, .. } | Self::Error { errors, .. } => errors,
            _ => &[],
        }
    }

    pub fn quarantine_path(&self) -> Option<&Path> {
        match self {
            Self::Failed {
                quarantine_path, ..
            }
            | Self::Error {
                quarantine_path, ..
            } => Some(quarantine_path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failed_serializes_with_status_tag() {
        let result = ProcessingResult::validation_failed(
            vec!["SCHEMA DRIFT DETECTED: discount_pct column missing.".into()],
            PathBuf::from("data/quarantine/20240101_000000_promotions.csv"),
        );
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "status": "failed",
                "reason": "validation_failed",
                "errors": ["SCHEMA DRIFT DETECTED: discount_pct column missing."],
                "quarantine_path": "data/quarantine/20240101_000000_promotions.csv"
            })
        );
    }

    #[test]
    fn test_skipped_shape() {
        assert_eq!(
            serde_json::to_value(ProcessingResult::file_not_found()).unwrap(),
            json!({"status": "skipped", "reason": "file_not_found"})
        );
    }

    #[test]
    fn test_error_without_errors_field_still_reads() {
        let result: ProcessingResult = serde_json::from_value(json!({
            "status": "error",
            "reason": "Could not parse data/stores.csv",
            "quarantine_path": "data/stores.csv"
        }))
        .unwrap();
        assert_eq!(result.status(), Status::Error);
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_accessors() {
        let ok = ProcessingResult::Success {
            records: 150,
            validated_path: PathBuf::from("data/stores_validated.csv"),
        };
        assert!(ok.is_success());
        assert_eq!(ok.records(), 150);
        assert_eq!(ok.reason(), None);
        assert_eq!(ok.quarantine_path(), None);

        let err = ProcessingResult::error("File not found: x.csv", PathBuf::from("x.csv"));
        assert_eq!(err.records(), 0);
        assert_eq!(err.reason().as_deref(), Some("File not found: x.csv"));
        assert_eq!(err.errors(), &["File not found: x.csv".to_string()]);
        assert_eq!(
            ProcessingResult::file_not_found().reason().as_deref(),
            Some("file_not_found")
        );
    }
}
