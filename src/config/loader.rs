// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{PipelineConfig, RawPipelineConfig};
use crate::errors::Result;

/// Load a pipeline file from a given path and return the raw
/// `RawPipelineConfig`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] to
/// also check dependency references and cycles.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawPipelineConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawPipelineConfig = toml::from_str(&contents)?;
    debug!(path = %path.display(), units = config.unit.len(), "pipeline config parsed");

    Ok(config)
}

/// Load a pipeline file from path and validate it.
///
/// This is the recommended entry point for the rest of the application.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<PipelineConfig> {
    let raw_config = load_from_path(&path)?;
    let config = PipelineConfig::try_from(raw_config)?;
    Ok(config)
}

/// Default pipeline file: `Modsched.toml` in the current directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Modsched.toml")
}
