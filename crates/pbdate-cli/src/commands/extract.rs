use pbdate_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_dir: PathBuf,
    config_file: Option<PathBuf>,
    output_format: &str,
    output_file: Option<PathBuf>,
    coerce_numeric: bool,
) -> Result<(), pbdate_core::error::PbDateError> {
    let config = super::effective_config(config_file)?;

    if !PdftotextExtractor::is_available() {
        return Err(pbdate_core::error::PbDateError::PdftotextNotFound);
    }
    let extractor = PdftotextExtractor::new();
    let table =
        pbdate_core::extract_directory(&input_dir, &extractor, &config.layout, coerce_numeric)?;

    match output_file {
        Some(path) => {
            // Always write CSV when saving to file
            table.write_csv(&path)?;
            eprintln!(
                "Extracted {} report(s), written to {}",
                table.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&table)?,
            _ => output::table::print(&table),
        },
    }

    Ok(())
}
