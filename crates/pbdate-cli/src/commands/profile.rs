use pbdate_core::profile::{process_activity, AGE_BP, CENTER_COLUMN, EXCESS_PB210};
use std::path::PathBuf;

use crate::output;

pub fn run(
    weights: PathBuf,
    measurements: PathBuf,
    out: PathBuf,
    core_year: i32,
    config_file: Option<PathBuf>,
) -> Result<(), pbdate_core::error::PbDateError> {
    let config = super::effective_config(config_file)?;

    let profile = process_activity(
        &weights,
        &measurements,
        &out,
        f64::from(core_year),
        &config.dating,
    )?;

    output::table::print_columns(&profile, &[CENTER_COLUMN, EXCESS_PB210, AGE_BP]);
    Ok(())
}
