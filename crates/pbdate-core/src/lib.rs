pub mod classify;
pub mod collect;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod profile;
pub mod sequence;
pub mod table;

use std::path::Path;

use config::ReportLayout;
use error::{ExtractionFailure, PbDateError};
use extraction::PdfExtractor;
use model::MeasurementRecord;
use table::Table;

/// Extract the measurement record of a single report.
///
/// The file name decides whether the report is a point-source calibration
/// or a regular sample; backend errors are folded into the failure.
pub fn extract_report(
    pdf_bytes: &[u8],
    identifier: &str,
    extractor: &dyn PdfExtractor,
    layout: &ReportLayout,
) -> Result<MeasurementRecord, ExtractionFailure> {
    let kind = classify::classify(identifier, &layout.point_source_prefix);
    let pages = extractor.extract_pages(pdf_bytes)?;
    parsing::extract_record(&pages, kind, layout)
}

/// Main API entry point for the extraction stage: collect every report in
/// `dir` and return the rows ordered by interval.
pub fn extract_directory(
    dir: &Path,
    extractor: &dyn PdfExtractor,
    layout: &ReportLayout,
    coerce_numeric: bool,
) -> Result<Table, PbDateError> {
    let batch = collect::collect(dir, extractor, layout)?;
    Ok(sequence::sequence(batch.to_table(), coerce_numeric))
}
