//! Backup command implementation

use crate::config::IngestConfig;
use crate::error::{ErrorCode, IngestError};
use crate::storage::backup_file;
use anyhow::Result;

pub fn run_backup_command(file: &std::path::Path, config: &IngestConfig) -> Result<()> {
    let backup_path = backup_file(file, &config.backup_dir).ok_or_else(|| {
        IngestError::storage_with_code(
            ErrorCode::STORAGE_BACKUP_FAILED,
            format!("Could not back up to {}", config.backup_dir.display()),
            Some(file.to_path_buf()),
        )
    })?;
    println!("{}", backup_path.display());
    Ok(())
}
