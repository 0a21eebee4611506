use crate::model::ReportKind;

/// Decide the report kind from its file name.
pub fn classify(identifier: &str, point_source_prefix: &str) -> ReportKind {
    if identifier.starts_with(point_source_prefix) {
        ReportKind::PointSource
    } else {
        ReportKind::Regular
    }
}
