use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;
pub mod helpers;

pub use codes::{describe_error_code, ErrorCode};
pub use helpers::ErrorExt;

/// The unified error type for the ingestion pipeline
///
/// Per-file problems (schema drift, rule violations, unreadable inputs) never
/// surface as an `IngestError` during a run; they are folded into a
/// `ProcessingResult`. This type carries what is left: configuration
/// problems, summary persistence failures, and errors from the ad hoc
/// storage commands.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Load error: {message}")]
    Load {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Storage error: {message}")]
    Storage {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Run summary error: {message}")]
    Summary {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl IngestError {
    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a load error with specific code and path
    pub fn load_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Load {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a storage error with specific code and path
    pub fn storage_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Storage {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a run summary error with specific code and path
    pub fn summary_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Summary {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Load { source: src, .. }
            | Self::Storage { source: src, .. }
            | Self::Summary { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Load { message, .. }
            | Self::Storage { message, .. }
            | Self::Summary { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Load { .. } => 3,
            Self::Storage { .. } => 4,
            Self::Summary { .. } => 6,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Load { code, .. }
            | Self::Storage { code, .. }
            | Self::Summary { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::Load { message, path, .. } => {
                if let Some(p) = path {
                    format!("Could not load {}: {}", p.display(), message)
                } else {
                    format!("Load error: {}", message)
                }
            }
            Self::Storage { message, path, .. } => {
                if let Some(p) = path {
                    format!("Storage error at {}: {}", p.display(), message)
                } else {
                    format!("Storage error: {}", message)
                }
            }
            Self::Summary { message, path, .. } => {
                if let Some(p) = path {
                    format!("Run summary {} could not be saved: {}", p.display(), message)
                } else {
                    format!("Run summary error: {}", message)
                }
            }
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut msg = format!("{:#}", self);
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            msg.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        msg
    }
}

/// Type alias for Results using IngestError
pub type Result<T> = std::result::Result<T, IngestError>;

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, message) = match err.kind() {
            ErrorKind::NotFound => (ErrorCode::STORAGE_NOT_FOUND, "File or directory not found"),
            ErrorKind::PermissionDenied => {
                (ErrorCode::STORAGE_PERMISSION_DENIED, "Permission denied")
            }
            ErrorKind::AlreadyExists => (ErrorCode::STORAGE_ALREADY_EXISTS, "Already exists"),
            _ => (ErrorCode::STORAGE_IO_ERROR, "IO operation failed"),
        };

        IngestError::storage_with_code(code, message, None).with_source(err)
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        IngestError::summary_with_code(
            ErrorCode::SUMMARY_SERIALIZATION_ERROR,
            "Invalid JSON document",
            None,
        )
        .with_source(err)
    }
}

impl From<toml::de::Error> for IngestError {
    fn from(err: toml::de::Error) -> Self {
        IngestError::config_with_code(ErrorCode::CONFIG_INVALID_TOML, "Invalid TOML syntax")
            .with_source(err)
    }
}

impl From<crate::storage::StorageError> for IngestError {
    fn from(err: crate::storage::StorageError) -> Self {
        use crate::storage::StorageError;

        match err {
            StorageError::NotFound(path) => IngestError::load_with_code(
                ErrorCode::LOAD_NOT_FOUND,
                "File not found",
                Some(path),
            ),
            StorageError::DuplicateColumn { path, column } => IngestError::load_with_code(
                ErrorCode::LOAD_DUPLICATE_COLUMN,
                format!("Duplicate column '{}'", column),
                Some(path),
            ),
            StorageError::Parse { path, message } => {
                IngestError::load_with_code(ErrorCode::LOAD_PARSE_ERROR, message, Some(path))
            }
            StorageError::Write { path, source } => IngestError::storage_with_code(
                ErrorCode::STORAGE_IO_ERROR,
                "Could not write CSV",
                Some(path),
            )
            .with_source(source),
            StorageError::Io(io_err) => IngestError::from(io_err),
        }
    }
}
