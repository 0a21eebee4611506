pub mod config;
pub mod extract;
pub mod profile;

use pbdate_core::config::{load_config, PipelineConfig};
use pbdate_core::error::PbDateError;
use std::path::PathBuf;

/// Load the config file if one was given, otherwise the built-in defaults.
pub fn effective_config(path: Option<PathBuf>) -> Result<PipelineConfig, PbDateError> {
    match path {
        Some(path) => load_config(&path),
        None => Ok(PipelineConfig::default()),
    }
}
