//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod patterns;

use std::path::{Path, PathBuf};

use tracing::debug;

use insparse_core::{InsparseConfig, PatternRegistry};

/// Load the configuration from `--config`, the user config file, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InsparseConfig> {
    if let Some(path) = config_path {
        return Ok(InsparseConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(InsparseConfig::from_file(&default_path)?)
    } else {
        Ok(InsparseConfig::default())
    }
}

/// Pick the pattern registry: an explicit registry file wins, then the
/// configured registry file, then the built-in registry for the insurer.
pub fn select_registry(
    insurer: Option<&str>,
    registry_file: Option<&PathBuf>,
    config: &InsparseConfig,
) -> anyhow::Result<PatternRegistry> {
    if let Some(path) = registry_file.or(config.extraction.registry_file.as_ref()) {
        return Ok(PatternRegistry::from_file(path)?);
    }

    let insurer = insurer.unwrap_or(&config.extraction.default_insurer);
    Ok(PatternRegistry::for_insurer(insurer))
}
