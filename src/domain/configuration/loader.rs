//! Run configuration loading.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, RunConfig};

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "rpt.toml";

/// Load the run configuration.
///
/// An explicit `path` must exist. Without one, `rpt.toml` under `root` is
/// used when present and defaults apply otherwise.
pub fn load_config(root: &Path, path: Option<&Path>) -> Result<RunConfig, AppError> {
    let config_path = match path {
        Some(explicit) => {
            if !explicit.exists() {
                return Err(AppError::ConfigNotFound(explicit.display().to_string()));
            }
            explicit.to_path_buf()
        }
        None => {
            let candidate = root.join(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                return Ok(RunConfig::default());
            }
            candidate
        }
    };

    tracing::debug!(path = %config_path.display(), "loading config");
    let content = fs::read_to_string(&config_path)?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<RunConfig, AppError> {
    let config: RunConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
