use serde::{Deserialize, Serialize};
use std::fmt;

use crate::table::{Cell, Table};

/// Column holding the report file name in batch tables.
pub const FILE_COLUMN: &str = "File";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Isotope {
    #[serde(rename = "Pb-210")]
    Pb210,
    #[serde(rename = "Bi-214")]
    Bi214,
    #[serde(rename = "Pb-214")]
    Pb214,
}

impl Isotope {
    pub const ALL: [Isotope; 3] = [Isotope::Pb210, Isotope::Bi214, Isotope::Pb214];

    /// Label as printed in the report, also used as the value column name.
    pub fn label(&self) -> &'static str {
        match self {
            Isotope::Pb210 => "Pb-210",
            Isotope::Bi214 => "Bi-214",
            Isotope::Pb214 => "Pb-214",
        }
    }

    /// Column name of the uncertainty.
    pub fn error_column(&self) -> &'static str {
        match self {
            Isotope::Pb210 => "Pb-210 error",
            Isotope::Bi214 => "Bi-214 error",
            Isotope::Pb214 => "Pb-214 error",
        }
    }
}

impl fmt::Display for Isotope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Calibration report of the certified Pb-210 reference source.
    PointSource,
    Regular,
}

impl ReportKind {
    /// Isotopes a report of this kind must contain, in priority order.
    pub fn required_isotopes(&self) -> &'static [Isotope] {
        match self {
            ReportKind::PointSource => &[Isotope::Pb210],
            ReportKind::Regular => &Isotope::ALL,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::PointSource => write!(f, "point-source"),
            ReportKind::Regular => write!(f, "regular"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub uncertainty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeasurementRecord {
    PointSource {
        pb210: Measurement,
    },
    Regular {
        pb210: Measurement,
        bi214: Measurement,
        pb214: Measurement,
    },
}

impl MeasurementRecord {
    pub fn kind(&self) -> ReportKind {
        match self {
            MeasurementRecord::PointSource { .. } => ReportKind::PointSource,
            MeasurementRecord::Regular { .. } => ReportKind::Regular,
        }
    }

    pub fn get(&self, isotope: Isotope) -> Option<Measurement> {
        match (self, isotope) {
            (MeasurementRecord::PointSource { pb210 }, Isotope::Pb210) => Some(*pb210),
            (MeasurementRecord::PointSource { .. }, _) => None,
            (MeasurementRecord::Regular { pb210, .. }, Isotope::Pb210) => Some(*pb210),
            (MeasurementRecord::Regular { bi214, .. }, Isotope::Bi214) => Some(*bi214),
            (MeasurementRecord::Regular { pb214, .. }, Isotope::Pb214) => Some(*pb214),
        }
    }
}

/// One successfully extracted report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub file: String,
    pub record: MeasurementRecord,
}

/// Records collected from a report directory, in collection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchTable {
    pub entries: Vec<BatchEntry>,
}

impl BatchTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten into the intermediate tabular layout.
    ///
    /// The Bi-214/Pb-214 columns only appear when at least one regular
    /// record is present; point-source rows leave them empty.
    pub fn to_table(&self) -> Table {
        let isotopes: &[Isotope] = if self
            .entries
            .iter()
            .any(|e| e.record.kind() == ReportKind::Regular)
        {
            &Isotope::ALL
        } else {
            &[Isotope::Pb210]
        };

        let mut columns = vec![FILE_COLUMN.to_string()];
        for iso in isotopes {
            columns.push(iso.label().to_string());
            columns.push(iso.error_column().to_string());
        }

        let mut table = Table::new(columns);
        for entry in &self.entries {
            let mut row = vec![Cell::Text(entry.file.clone())];
            for iso in isotopes {
                match entry.record.get(*iso) {
                    Some(m) => {
                        row.push(Cell::Number(m.value));
                        row.push(Cell::Number(m.uncertainty));
                    }
                    None => {
                        row.push(Cell::Empty);
                        row.push(Cell::Empty);
                    }
                }
            }
            table.push_row(row);
        }
        table
    }
}
