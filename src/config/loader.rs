use super::{ConfigOverrides, IngestConfig};
use crate::error::{codes::ErrorCode, IngestError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Picked up from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "ingest.toml";

/// Read a TOML config file
pub fn load_file(path: &Path) -> Result<IngestConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        let code = if e.kind() == std::io::ErrorKind::NotFound {
            ErrorCode::CONFIG_NOT_FOUND
        } else {
            ErrorCode::CONFIG_GENERIC
        };
        IngestError::config_with_code(
            code,
            format!("Cannot read config file {}", path.display()),
        )
        .with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        IngestError::from(e).with_context(format!("in config file {}", path.display()))
    })
}

/// Build the effective configuration
///
/// An explicit `config_path` must exist; the implicit `ingest.toml` in
/// `working_dir` is only used when present.
pub fn load_config(
    config_path: Option<&Path>,
    working_dir: &Path,
    overrides: &ConfigOverrides,
) -> Result<IngestConfig> {
    let mut config = match config_path {
        Some(path) => load_file(path)?,
        None => {
            let implicit = working_dir.join(DEFAULT_CONFIG_FILE);
            if implicit.is_file() {
                load_file(&implicit)?
            } else {
                IngestConfig::default()
            }
        }
    };

    config.merge_env_vars();
    config.apply_overrides(overrides);

    debug!(?config, "Resolved configuration");
    Ok(config)
}
