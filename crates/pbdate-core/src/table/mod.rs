pub mod xlsx;

use std::path::Path;

use crate::error::PbDateError;

/// A single table cell.
///
/// `Empty` is the undefined value: it reads back from blank CSV cells and
/// is what NaN turns into on write.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Interpret a raw CSV field: blank is empty, anything `f64` accepts is
    /// a number, the rest stays text.
    pub fn infer(raw: &str) -> Cell {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(v) => Cell::from_f64(v),
            Err(_) => Cell::Text(raw.to_string()),
        }
    }

    /// NaN becomes `Empty`; infinities are kept.
    pub fn from_f64(v: f64) -> Cell {
        if v.is_nan() {
            Cell::Empty
        } else {
            Cell::Number(v)
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => s.trim().parse().ok(),
            Cell::Empty => None,
        }
    }

    /// Numeric value with undefined mapped to NaN, for column arithmetic.
    pub fn to_f64_or_nan(&self) -> f64 {
        self.as_f64().unwrap_or(f64::NAN)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Best-effort numeric coercion: text that does not parse becomes empty.
    pub fn coerce_numeric(self) -> Cell {
        match self {
            Cell::Text(s) => match s.trim().parse::<f64>() {
                Ok(v) => Cell::from_f64(v),
                Err(_) => Cell::Empty,
            },
            other => other,
        }
    }

    /// Render for CSV output.
    pub fn render(&self) -> String {
        match self {
            Cell::Number(v) => format_number(*v),
            Cell::Text(s) => s.clone(),
            Cell::Empty => String::new(),
        }
    }
}

/// Shortest round-trip form, keeping a `.0` on integral values so numeric
/// columns read back as floats.
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else if v.is_infinite() {
        if v > 0.0 { "inf".into() } else { "-inf".into() }
    } else if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Column-named rows of cells. Every row has exactly one cell per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like `column_index`, but a missing column is an error naming `table`.
    pub fn require_column(&self, table: &str, name: &str) -> Result<usize, PbDateError> {
        self.column_index(name)
            .ok_or_else(|| PbDateError::MissingColumn {
                table: table.to_string(),
                column: name.to_string(),
            })
    }

    /// Append a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    /// Append a column computed per row.
    pub fn push_column<F>(&mut self, name: &str, mut f: F)
    where
        F: FnMut(&[Cell]) -> Cell,
    {
        for row in &mut self.rows {
            let cell = f(row.as_slice());
            row.push(cell);
        }
        self.columns.push(name.to_string());
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Vec<Cell>> {
        &mut self.rows
    }

    /// Read a CSV file with a header row.
    pub fn read_csv(path: &Path) -> Result<Table, PbDateError> {
        let reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
        Self::from_csv_reader(reader)
    }

    pub fn read_csv_str(data: &str) -> Result<Table, PbDateError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(data.as_bytes());
        Self::from_csv_reader(reader)
    }

    fn from_csv_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Table, PbDateError> {
        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let mut table = Table::new(columns);
        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter().map(Cell::infer).collect());
        }
        Ok(table)
    }

    /// Load a table from CSV or, by extension, from a spreadsheet.
    pub fn load(path: &Path) -> Result<Table, PbDateError> {
        if xlsx::is_spreadsheet(path) {
            xlsx::read_first_sheet(path)
        } else {
            Self::read_csv(path)
        }
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), PbDateError> {
        let writer = csv::Writer::from_path(path)?;
        self.write_to(writer)
    }

    pub fn to_csv_string(&self) -> Result<String, PbDateError> {
        let mut buf = Vec::new();
        self.write_to(csv::Writer::from_writer(&mut buf))?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn write_to<W: std::io::Write>(&self, mut writer: csv::Writer<W>) -> Result<(), PbDateError> {
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(Cell::render))?;
        }
        writer.flush()?;
        Ok(())
    }
}
