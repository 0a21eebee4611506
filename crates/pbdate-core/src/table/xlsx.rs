use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::PbDateError;
use crate::table::{Cell, Table};

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Read the first worksheet, treating row 1 as the header.
///
/// Lab sample-weight sheets are often kept as workbooks; the result has the
/// same shape as a CSV load so it feeds straight into the profile step.
pub fn read_first_sheet(path: &Path) -> Result<Table, PbDateError> {
    let spreadsheet_err = |reason: String| PbDateError::Spreadsheet {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook =
        open_workbook_auto(path).map_err(|e| spreadsheet_err(format!("failed to open: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| spreadsheet_err("workbook has no sheets".into()))?
        .map_err(|e| spreadsheet_err(format!("failed to read first sheet: {e}")))?;

    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(header_name).collect(),
        None => return Ok(Table::default()),
    };

    let mut table = Table::new(columns);
    for row in rows {
        let cells: Vec<Cell> = row.iter().map(cell_from_data).collect();
        if cells.iter().all(|c| *c == Cell::Empty) {
            continue;
        }
        table.push_row(cells);
    }

    Ok(table)
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => format!("{other}"),
    }
}

fn cell_from_data(cell: &Data) -> Cell {
    match cell {
        Data::Float(f) => Cell::from_f64(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::String(s) => Cell::infer(s),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::Empty => Cell::Empty,
        Data::Error(_) => Cell::Empty,
        other => Cell::Text(format!("{other}")),
    }
}
