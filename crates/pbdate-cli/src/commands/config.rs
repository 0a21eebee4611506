use pbdate_core::config::load_config;
use pbdate_core::error::PbDateError;
use std::path::{Path, PathBuf};

/// Print the effective configuration.
pub fn show(config_file: Option<PathBuf>) -> Result<(), PbDateError> {
    let config = super::effective_config(config_file)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Validate a config file.
pub fn validate(path: &Path) -> Result<(), PbDateError> {
    let config = load_config(path)?;
    println!("Config is valid.");
    println!(
        "  Reference activity: {}",
        config.dating.reference_activity
    );
    println!("  Decay constant: {} /yr", config.dating.decay_constant);
    println!(
        "  Half-life: {:.2} yr",
        std::f64::consts::LN_2 / config.dating.decay_constant
    );
    println!(
        "  Isotope page: {} (zero-based)",
        config.layout.page_index
    );
    println!(
        "  Point-source prefix: {}",
        config.layout.point_source_prefix
    );
    Ok(())
}
