use std::cmp::Ordering;

use crate::model::{Isotope, FILE_COLUMN};
use crate::parsing::identifier::interval_index;
use crate::table::{Cell, Table};

/// Order batch rows by the interval index in their file name.
///
/// The sort is stable and ascending; names without an integer index go
/// last in their original order. With `coerce_numeric`, the isotope value
/// and uncertainty columns are converted to numbers, unparseable text
/// becoming empty.
pub fn sequence(mut table: Table, coerce_numeric: bool) -> Table {
    if let Some(file_idx) = table.column_index(FILE_COLUMN) {
        table.rows_mut().sort_by(|a, b| {
            let ka = row_index(&a[file_idx]);
            let kb = row_index(&b[file_idx]);
            compare_index(ka, kb)
        });
    }

    if coerce_numeric {
        let numeric: Vec<usize> = Isotope::ALL
            .iter()
            .flat_map(|iso| [iso.label(), iso.error_column()])
            .filter_map(|name| table.column_index(name))
            .collect();
        for row in table.rows_mut() {
            for &idx in &numeric {
                let cell = std::mem::replace(&mut row[idx], Cell::Empty);
                row[idx] = cell.coerce_numeric();
            }
        }
    }

    table
}

fn row_index(cell: &Cell) -> Option<i64> {
    match cell {
        Cell::Text(name) => interval_index(name),
        Cell::Number(n) if n.fract() == 0.0 => Some(*n as i64),
        _ => None,
    }
}

fn compare_index(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
