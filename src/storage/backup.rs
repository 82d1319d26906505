//! Timestamped file backups

use super::timestamped_path;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Copy `path` into `backup_dir` as `<timestamp>_<file name>`
///
/// Returns `None` when the backup could not be made; the failure is logged.
pub fn backup_file(path: &Path, backup_dir: &Path) -> Option<PathBuf> {
    let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        error!(path = %path.display(), "Cannot back up a path without a file name");
        return None;
    };

    if let Err(e) = fs::create_dir_all(backup_dir) {
        error!(dir = %backup_dir.display(), error = %e, "Failed to create backup directory");
        return None;
    }

    let backup_path = timestamped_path(backup_dir, &file_name, Utc::now());
    match fs::copy(path, &backup_path) {
        Ok(_) => {
            info!(backup = %backup_path.display(), "Created backup");
            Some(backup_path)
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to create backup");
            None
        }
    }
}
