use super::{ErrorCode, IngestError};
use std::path::Path;

/// Extension trait for convenient error conversion
pub trait ErrorExt<T> {
    /// Convert to a run summary error for `path`
    fn to_summary_error(self, path: &Path) -> Result<T, IngestError>;
}

impl<T, E> ErrorExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn to_summary_error(self, path: &Path) -> Result<T, IngestError> {
        self.map_err(|e| {
            IngestError::summary_with_code(
                ErrorCode::SUMMARY_WRITE_FAILED,
                "Failed to write run summary",
                Some(path.to_path_buf()),
            )
            .with_source(e)
        })
    }
}
