use std::path::{Path, PathBuf};

use crate::config::ReportLayout;
use crate::error::PbDateError;
use crate::extraction::PdfExtractor;
use crate::model::{BatchEntry, BatchTable};

/// Run every PDF report in `dir` through classification and extraction.
///
/// Reports that fail are logged with their reason and left out; only a
/// failure to list the directory aborts. Files are visited in name order so
/// repeated runs over the same directory give the same table.
pub fn collect(
    dir: &Path,
    extractor: &dyn PdfExtractor,
    layout: &ReportLayout,
) -> Result<BatchTable, PbDateError> {
    let files = list_reports(dir)?;
    let mut batch = BatchTable::default();

    for path in &files {
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                log::warn!("skipping '{}': file name is not valid UTF-8", path.display());
                continue;
            }
        };

        let pdf_bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("error processing PDF file '{file_name}': {e}. Skipping.");
                continue;
            }
        };

        match crate::extract_report(&pdf_bytes, &file_name, extractor, layout) {
            Ok(record) => {
                log::debug!("extracted {} report '{file_name}'", record.kind());
                batch.entries.push(BatchEntry {
                    file: file_name,
                    record,
                });
            }
            Err(reason) => {
                log::warn!("PDF file '{file_name}': {reason}. Skipping.");
            }
        }
    }

    log::info!(
        "extracted {} of {} PDF report(s) from {} using {}",
        batch.len(),
        files.len(),
        dir.display(),
        extractor.backend_name()
    );

    Ok(batch)
}

/// Regular files with a `.pdf` extension (any case), sorted by name.
pub fn list_reports(dir: &Path) -> Result<Vec<PathBuf>, PbDateError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_pdf(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
