use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PbDateError;
use crate::parsing::TokenPosition;

/// Certified activity of the Pb-210 point-source reference.
pub const DEFAULT_REFERENCE_ACTIVITY: f64 = 151031.56;

/// Pb-210 decay constant (1/yr), half-life of about 22.3 years.
pub const DEFAULT_DECAY_CONSTANT: f64 = 0.03114;

pub const DEFAULT_PAGE_INDEX: usize = 2;

pub const DEFAULT_POINT_SOURCE_PREFIX: &str = "PtSrc_";

/// Numeric constants of the dating model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatingConstants {
    /// Divisor turning the measured point-source Pb-210 into the
    /// self-absorption correction factor.
    pub reference_activity: f64,
    pub decay_constant: f64,
}

impl Default for DatingConstants {
    fn default() -> Self {
        DatingConstants {
            reference_activity: DEFAULT_REFERENCE_ACTIVITY,
            decay_constant: DEFAULT_DECAY_CONSTANT,
        }
    }
}

/// Where in a report the isotope lines live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    /// Zero-based page holding the isotope table.
    pub page_index: usize,
    /// File name prefix marking point-source calibration reports.
    pub point_source_prefix: String,
    pub position: TokenPosition,
}

impl Default for ReportLayout {
    fn default() -> Self {
        ReportLayout {
            page_index: DEFAULT_PAGE_INDEX,
            point_source_prefix: DEFAULT_POINT_SOURCE_PREFIX.to_string(),
            position: TokenPosition::Trailing,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub dating: DatingConstants,
    pub layout: ReportLayout,
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<PipelineConfig, PbDateError> {
    let content = std::fs::read_to_string(path).map_err(|e| PbDateError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a config from a JSON string.
pub fn parse_config(json: &str, source: &Path) -> Result<PipelineConfig, PbDateError> {
    let config: PipelineConfig =
        serde_json::from_str(json).map_err(|e| PbDateError::ConfigLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &PipelineConfig) -> Result<(), PbDateError> {
    let dating = &config.dating;
    if !dating.reference_activity.is_finite() || dating.reference_activity <= 0.0 {
        return Err(PbDateError::ConfigInvalid(format!(
            "reference_activity must be a positive number, got {}",
            dating.reference_activity
        )));
    }
    if !dating.decay_constant.is_finite() || dating.decay_constant <= 0.0 {
        return Err(PbDateError::ConfigInvalid(format!(
            "decay_constant must be a positive number, got {}",
            dating.decay_constant
        )));
    }
    if config.layout.point_source_prefix.is_empty() {
        return Err(PbDateError::ConfigInvalid(
            "point_source_prefix must not be empty".into(),
        ));
    }
    Ok(())
}
