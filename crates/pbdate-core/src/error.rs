use std::path::PathBuf;

use crate::model::Isotope;

#[derive(Debug, thiserror::Error)]
pub enum PbDateError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("{table} table is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("failed to read spreadsheet {path}: {reason}")]
    Spreadsheet { path: PathBuf, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single report was left out of the batch.
///
/// None of these abort a run; the collector logs the message and moves on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionFailure {
    #[error("report too short: {pages} page(s), expected at least {required}")]
    TooShort { pages: usize, required: usize },

    #[error("{0} not found")]
    IsotopeNotFound(Isotope),

    #[error("{isotope} line has no value/uncertainty pair: '{line}'")]
    MalformedLine { isotope: Isotope, line: String },

    #[error("invalid {isotope} number '{token}'")]
    InvalidNumber { isotope: Isotope, token: String },

    #[error("error reading report: {0}")]
    Backend(String),
}

impl From<PbDateError> for ExtractionFailure {
    fn from(e: PbDateError) -> Self {
        ExtractionFailure::Backend(e.to_string())
    }
}
