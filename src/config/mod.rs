//! Pipeline configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `INGEST_*` environment variables, then command-line flags. See
//! [`loader`] for the file and environment layers.

pub mod loader;

pub use loader::{load_config, DEFAULT_CONFIG_FILE};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_DATA_DIR: &str = "INGEST_DATA_DIR";
pub const ENV_QUARANTINE_DIR: &str = "INGEST_QUARANTINE_DIR";
pub const ENV_SUMMARY_PATH: &str = "INGEST_SUMMARY_PATH";
pub const ENV_BACKUP_DIR: &str = "INGEST_BACKUP_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    /// Directory holding the input files
    pub data_dir: PathBuf,
    /// Where rejected files go; `<data_dir>/quarantine` when unset
    pub quarantine_dir: Option<PathBuf>,
    /// Run summary document
    pub summary_path: PathBuf,
    pub backup_dir: PathBuf,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            quarantine_dir: None,
            summary_path: PathBuf::from("logs").join("pipeline_summary.json"),
            backup_dir: PathBuf::from("backups"),
        }
    }
}

/// Command-line values that take precedence over every other layer
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub quarantine_dir: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
    pub backup_dir: Option<PathBuf>,
}

impl IngestConfig {
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_quarantine_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.quarantine_dir = Some(dir.into());
        self
    }

    pub fn with_summary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.summary_path = path.into();
        self
    }

    pub fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = dir.into();
        self
    }

    /// Effective quarantine directory
    pub fn quarantine_dir(&self) -> PathBuf {
        self.quarantine_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("quarantine"))
    }

    pub fn data_file(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    pub fn summary_path(&self) -> &Path {
        &self.summary_path
    }

    /// Apply `INGEST_*` variables from the process environment
    pub fn merge_env_vars(&mut self) {
        self.merge_env_from(|key| std::env::var(key).ok());
    }

    /// Apply `INGEST_*` variables using `lookup`; empty values are ignored
    pub fn merge_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        if let Some(dir) = get(ENV_DATA_DIR) {
            self.data_dir = dir;
        }
        if let Some(dir) = get(ENV_QUARANTINE_DIR) {
            self.quarantine_dir = Some(dir);
        }
        if let Some(path) = get(ENV_SUMMARY_PATH) {
            self.summary_path = path;
        }
        if let Some(dir) = get(ENV_BACKUP_DIR) {
            self.backup_dir = dir;
        }
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(dir) = &overrides.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(dir) = &overrides.quarantine_dir {
            self.quarantine_dir = Some(dir.clone());
        }
        if let Some(path) = &overrides.summary_path {
            self.summary_path = path.clone();
        }
        if let Some(dir) = &overrides.backup_dir {
            self.backup_dir = dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = IngestConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.quarantine_dir(), PathBuf::from("data/quarantine"));
        assert_eq!(
            config.summary_path(),
            Path::new("logs/pipeline_summary.json")
        );
        assert_eq!(config.backup_dir, PathBuf::from("backups"));
    }

    #[test]
    fn test_quarantine_dir_follows_data_dir_until_set() {
        let config = IngestConfig::default().with_data_dir("/srv/retail");
        assert_eq!(config.quarantine_dir(), PathBuf::from("/srv/retail/quarantine"));

        let config = config.with_quarantine_dir("/var/quarantine");
        assert_eq!(config.quarantine_dir(), PathBuf::from("/var/quarantine"));
    }

    #[test]
    fn test_merge_env_from() {
        let env: HashMap<&str, &str> = [
            (ENV_DATA_DIR, "/env/data"),
            (ENV_SUMMARY_PATH, "/env/summary.json"),
            (ENV_BACKUP_DIR, "  "),
        ]
        .into_iter()
        .collect();

        let mut config = IngestConfig::default();
        config.merge_env_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/env/data"));
        assert_eq!(config.summary_path, PathBuf::from("/env/summary.json"));
        assert_eq!(config.quarantine_dir, None);
        assert_eq!(config.backup_dir, PathBuf::from("backups"));
    }

    #[test]
    fn test_overrides_win() {
        let mut config = IngestConfig::default().with_data_dir("/from/file");
        config.apply_overrides(&ConfigOverrides {
            data_dir: Some(PathBuf::from("/from/cli")),
            quarantine_dir: None,
            summary_path: Some(PathBuf::from("out.json")),
            backup_dir: None,
        });
        assert_eq!(config.data_dir, PathBuf::from("/from/cli"));
        assert_eq!(config.summary_path, PathBuf::from("out.json"));
        assert_eq!(config.quarantine_dir(), PathBuf::from("/from/cli/quarantine"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: IngestConfig = toml::from_str("data_dir = \"incoming\"\n").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("incoming"));
        assert_eq!(config.backup_dir, PathBuf::from("backups"));
    }

    #[test]
    fn test_unknown_toml_key_rejected() {
        assert!(toml::from_str::<IngestConfig>("data_directory = \"x\"\n").is_err());
    }
}
