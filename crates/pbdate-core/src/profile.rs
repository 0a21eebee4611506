use std::path::Path;

use crate::config::DatingConstants;
use crate::error::PbDateError;
use crate::model::{Isotope, FILE_COLUMN};
use crate::parsing::identifier::interval_center;
use crate::table::{Cell, Table};

pub const CENTER_COLUMN: &str = "Center point of interval";
pub const WEIGHT_COLUMN: &str = "sediment weight (g)";
pub const POINT_SOURCE_COLUMN: &str = "ptsrc_pb210";

pub const PB210_UNCERTAINTY: &str = "Pb-210 activity Uncertainty (Bq-g)";
pub const PB210_ACTIVITY: &str = "Pb-210 activity (Bq/g)";
pub const CORRECTION_FACTOR: &str = "Pb-210 correction factor";
pub const CORRECTED_PB210: &str = "Self absorb. Corrected Pb-210 activity (Bq/g)";
pub const BI214_ACTIVITY: &str = "Bi-214 activity (Bq/g)";
pub const PB214_ACTIVITY: &str = "Pb-214 activity (Bq/g)";
pub const SUPPORTED_ACTIVITY: &str = "Averaged supported activity of Bi-214 and Pb-214 (Bq/g)";
pub const BACKGROUND_UNCERTAINTY: &str = "Background activity uncertainty (Bq/g)";
pub const EXCESS_PB210: &str = "Excess Pb-210 (Bq/g)";
pub const SURFACE_ACTIVITY: &str = "Surface activity";
pub const AGE_BP: &str = "Age bp";
pub const CALENDAR_YEARS: &str = "calendar years pre year of core";

/// Suffix for measurement columns whose name is already taken by the
/// weights table.
const CLASH_SUFFIX: &str = " (measurement)";

/// Join weights with measurements and compute the excess Pb-210 activity
/// and age of each core interval.
///
/// Sample weights drive a left join against the sequenced measurements;
/// the derived columns are then appended in dependency order, each reading
/// only columns that already exist.
pub fn compute_profile(
    weights: &Table,
    measurements: &Table,
    constants: &DatingConstants,
    core_year: f64,
) -> Result<Table, PbDateError> {
    let mut data = join_on_center(weights, measurements)?;
    let col = |data: &Table, name: &str| data.require_column("joined", name);

    let weight = col(&data, WEIGHT_COLUMN)?;
    let ptsrc = col(&data, POINT_SOURCE_COLUMN)?;
    let pb210 = col(&data, measured(weights, Isotope::Pb210.label()).as_str())?;
    let pb210_err = col(&data, measured(weights, Isotope::Pb210.error_column()).as_str())?;
    let bi214 = col(&data, measured(weights, Isotope::Bi214.label()).as_str())?;
    let bi214_err = col(&data, measured(weights, Isotope::Bi214.error_column()).as_str())?;
    let pb214 = col(&data, measured(weights, Isotope::Pb214.label()).as_str())?;
    let pb214_err = col(&data, measured(weights, Isotope::Pb214.error_column()).as_str())?;
    let center = col(&data, CENTER_COLUMN)?;
    let file = col(&data, measured(weights, FILE_COLUMN).as_str())?;

    let num = |row: &[Cell], idx: usize| row[idx].to_f64_or_nan();

    data.push_column(PB210_UNCERTAINTY, |r| {
        Cell::from_f64(num(r, pb210_err) / num(r, weight))
    });
    let activity = data.columns().len();
    data.push_column(PB210_ACTIVITY, |r| Cell::from_f64(num(r, pb210) / num(r, weight)));
    let factor = data.columns().len();
    data.push_column(CORRECTION_FACTOR, |r| {
        Cell::from_f64(num(r, ptsrc) / constants.reference_activity)
    });
    let corrected = data.columns().len();
    data.push_column(CORRECTED_PB210, |r| {
        Cell::from_f64(num(r, activity) / num(r, factor))
    });
    let bi_activity = data.columns().len();
    data.push_column(BI214_ACTIVITY, |r| Cell::from_f64(num(r, bi214) / num(r, weight)));
    let pb214_activity = data.columns().len();
    data.push_column(PB214_ACTIVITY, |r| Cell::from_f64(num(r, pb214) / num(r, weight)));
    let supported = data.columns().len();
    data.push_column(SUPPORTED_ACTIVITY, |r| {
        Cell::from_f64((num(r, bi_activity) + num(r, pb214_activity)) / 2.0)
    });
    data.push_column(BACKGROUND_UNCERTAINTY, |r| {
        Cell::from_f64(((num(r, bi214_err) + num(r, pb214_err)) / 2.0) / num(r, weight))
    });
    let excess = data.columns().len();
    data.push_column(EXCESS_PB210, |r| {
        Cell::from_f64(num(r, corrected) - num(r, supported))
    });

    // Surface = youngest = first interval in order.
    let surface = data
        .rows()
        .first()
        .map(|r| num(r.as_slice(), excess))
        .unwrap_or(f64::NAN);
    let surface_idx = data.columns().len();
    data.push_column(SURFACE_ACTIVITY, |_| Cell::from_f64(surface));

    let age = data.columns().len();
    data.push_column(AGE_BP, |r| {
        let row_excess = num(r, excess);
        if let Some(msg) = age_warning(&r[center], &r[file], row_excess) {
            log::warn!("{msg}");
        }
        Cell::from_f64(age_bp(num(r, surface_idx), row_excess, constants.decay_constant))
    });
    data.push_column(CALENDAR_YEARS, |r| Cell::from_f64(core_year - num(r, age)));

    Ok(data)
}

/// Warning for a measured interval whose excess Pb-210 cannot give a
/// finite age. Intervals without a measurement are not reported.
fn age_warning(center: &Cell, file: &Cell, excess: f64) -> Option<String> {
    if *file == Cell::Empty || excess > 0.0 {
        return None;
    }
    Some(format!(
        "interval centered at {}: excess Pb-210 is {excess}, age is not finite",
        center.render()
    ))
}

/// Years before present for an interval, by exponential decay from the
/// surface activity.
pub fn age_bp(surface: f64, excess: f64, decay_constant: f64) -> f64 {
    (1.0 / decay_constant) * (surface / excess).ln()
}

/// Left join: every weights row is kept, in order, once per matching
/// measurement row or once with empty measurement cells.
pub fn join_on_center(weights: &Table, measurements: &Table) -> Result<Table, PbDateError> {
    let key_idx = weights.require_column("weights", CENTER_COLUMN)?;
    weights.require_column("weights", WEIGHT_COLUMN)?;
    weights.require_column("weights", POINT_SOURCE_COLUMN)?;
    let file_idx = measurements.require_column("measurements", FILE_COLUMN)?;
    for iso in Isotope::ALL {
        measurements.require_column("measurements", iso.label())?;
        measurements.require_column("measurements", iso.error_column())?;
    }

    // Measurement columns other than the join key, with clashes renamed.
    let carried: Vec<usize> = (0..measurements.columns().len())
        .filter(|&i| measurements.columns()[i] != CENTER_COLUMN)
        .collect();
    let mut columns: Vec<String> = weights.columns().to_vec();
    for &i in &carried {
        columns.push(measured(weights, &measurements.columns()[i]));
    }

    let centers: Vec<Option<f64>> = measurements
        .rows()
        .iter()
        .map(|row| match &row[file_idx] {
            Cell::Text(name) => interval_center(name),
            other => other.as_f64(),
        })
        .collect();

    let mut joined = Table::new(columns);
    for wrow in weights.rows() {
        let key = wrow[key_idx].as_f64();
        let mut matched = false;
        if let Some(key) = key {
            for (mrow, center) in measurements.rows().iter().zip(&centers) {
                if *center == Some(key) {
                    matched = true;
                    let mut row = wrow.clone();
                    row.extend(carried.iter().map(|&i| mrow[i].clone()));
                    joined.push_row(row);
                }
            }
        }
        if !matched {
            joined.push_row(wrow.clone());
        }
    }

    Ok(joined)
}

/// Output name of a measurement column after joining onto `weights`.
fn measured(weights: &Table, name: &str) -> String {
    if weights.column_index(name).is_some() {
        format!("{name}{CLASH_SUFFIX}")
    } else {
        name.to_string()
    }
}

/// Load both tables, compute the profile and write it as CSV.
pub fn process_activity(
    weights_path: &Path,
    measurements_path: &Path,
    output_path: &Path,
    core_year: f64,
    constants: &DatingConstants,
) -> Result<Table, PbDateError> {
    let weights = Table::load(weights_path)?;
    let measurements = Table::read_csv(measurements_path)?;
    log::debug!(
        "loaded {} weight row(s) and {} measurement row(s)",
        weights.len(),
        measurements.len()
    );

    let profile = compute_profile(&weights, &measurements, constants, core_year)?;
    profile.write_csv(output_path)?;

    log::info!(
        "Calculations completed, data exported to '{}'",
        output_path.display()
    );
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(rows: &[(f64, f64)]) -> Table {
        let mut t = Table::new(vec![
            CENTER_COLUMN.into(),
            WEIGHT_COLUMN.into(),
            POINT_SOURCE_COLUMN.into(),
        ]);
        for &(center, weight) in rows {
            t.push_row(vec![
                Cell::Number(center),
                Cell::Number(weight),
                Cell::Number(151031.56),
            ]);
        }
        t
    }

    fn measurements(rows: &[(&str, [f64; 6])]) -> Table {
        let mut columns = vec![FILE_COLUMN.to_string()];
        for iso in Isotope::ALL {
            columns.push(iso.label().into());
            columns.push(iso.error_column().into());
        }
        let mut t = Table::new(columns);
        for (file, values) in rows {
            let mut row = vec![Cell::Text(file.to_string())];
            row.extend(values.iter().map(|v| Cell::Number(*v)));
            t.push_row(row);
        }
        t
    }

    fn value(table: &Table, row: usize, column: &str) -> Option<f64> {
        let idx = table.column_index(column).unwrap();
        table.rows()[row][idx].as_f64()
    }

    #[test]
    fn test_end_to_end_numbers() {
        let w = weights(&[(1.0, 2.0)]);
        let m = measurements(&[("core_1.pdf", [10.0, 1.0, 2.0, 0.4, 2.0, 0.6])]);
        let p = compute_profile(&w, &m, &DatingConstants::default(), 2020.0).unwrap();

        assert_eq!(value(&p, 0, PB210_ACTIVITY), Some(5.0));
        assert_eq!(value(&p, 0, PB210_UNCERTAINTY), Some(0.5));
        assert_eq!(value(&p, 0, CORRECTION_FACTOR), Some(1.0));
        assert_eq!(value(&p, 0, CORRECTED_PB210), Some(5.0));
        assert_eq!(value(&p, 0, BI214_ACTIVITY), Some(1.0));
        assert_eq!(value(&p, 0, PB214_ACTIVITY), Some(1.0));
        assert_eq!(value(&p, 0, SUPPORTED_ACTIVITY), Some(1.0));
        assert_eq!(value(&p, 0, BACKGROUND_UNCERTAINTY), Some(0.25));
        assert_eq!(value(&p, 0, EXCESS_PB210), Some(4.0));
        assert_eq!(value(&p, 0, SURFACE_ACTIVITY), Some(4.0));
        assert_eq!(value(&p, 0, AGE_BP), Some(0.0));
        assert_eq!(value(&p, 0, CALENDAR_YEARS), Some(2020.0));
    }

    #[test]
    fn test_surface_is_first_row_and_age_decays() {
        let w = weights(&[(1.0, 1.0), (3.0, 1.0)]);
        let m = measurements(&[
            ("core_3.pdf", [5.0, 0.1, 0.0, 0.0, 0.0, 0.0]),
            ("core_1.pdf", [10.0, 0.1, 0.0, 0.0, 0.0, 0.0]),
        ]);
        let p = compute_profile(&w, &m, &DatingConstants::default(), 2020.0).unwrap();

        assert_eq!(value(&p, 0, SURFACE_ACTIVITY), Some(10.0));
        assert_eq!(value(&p, 1, SURFACE_ACTIVITY), Some(10.0));
        assert_eq!(value(&p, 0, AGE_BP), Some(0.0));

        let expected = (1.0 / 0.03114) * 2.0_f64.ln();
        let age = value(&p, 1, AGE_BP).unwrap();
        assert!((age - expected).abs() < 1e-9);
        let year = value(&p, 1, CALENDAR_YEARS).unwrap();
        assert!((year - (2020.0 - expected)).abs() < 1e-9);
    }

    #[test]
    fn test_range_identifier_joins_on_median() {
        let w = weights(&[(5.0, 1.0)]);
        let m = measurements(&[("core_4-6.pdf", [3.0, 0.1, 1.0, 0.1, 1.0, 0.1])]);
        let p = compute_profile(&w, &m, &DatingConstants::default(), 2020.0).unwrap();
        assert_eq!(value(&p, 0, EXCESS_PB210), Some(2.0));
    }

    #[test]
    fn test_unmatched_weight_row_is_kept_with_empty_activity() {
        let w = weights(&[(1.0, 1.0), (9.0, 1.0)]);
        let m = measurements(&[
            ("core_1.pdf", [3.0, 0.1, 1.0, 0.1, 1.0, 0.1]),
            ("core_42.pdf", [3.0, 0.1, 1.0, 0.1, 1.0, 0.1]),
        ]);
        let p = compute_profile(&w, &m, &DatingConstants::default(), 2020.0).unwrap();

        assert_eq!(p.len(), 2);
        assert_eq!(value(&p, 1, CENTER_COLUMN), Some(9.0));
        assert_eq!(value(&p, 1, FILE_COLUMN), None);
        assert_eq!(value(&p, 1, PB210_ACTIVITY), None);
        assert_eq!(value(&p, 1, AGE_BP), None);
        // The surface still comes from the first row.
        assert_eq!(value(&p, 1, SURFACE_ACTIVITY), Some(2.0));
    }

    #[test]
    fn test_undefined_keys_match_nothing() {
        let mut w = weights(&[(1.0, 1.0)]);
        w.push_row(vec![Cell::Empty, Cell::Number(1.0), Cell::Number(151031.56)]);
        let m = measurements(&[
            ("core_1.pdf", [3.0, 0.1, 1.0, 0.1, 1.0, 0.1]),
            ("core_top.pdf", [5.0, 0.1, 1.0, 0.1, 1.0, 0.1]),
        ]);
        let p = compute_profile(&w, &m, &DatingConstants::default(), 2020.0).unwrap();

        assert_eq!(p.len(), 2);
        assert_eq!(value(&p, 0, PB210_ACTIVITY), Some(3.0));
        assert_eq!(value(&p, 1, CENTER_COLUMN), None);
        assert_eq!(value(&p, 1, WEIGHT_COLUMN), Some(1.0));
        assert_eq!(p.rows()[1][p.column_index(FILE_COLUMN).unwrap()], Cell::Empty);
        assert_eq!(value(&p, 1, PB210_ACTIVITY), None);
        assert_eq!(value(&p, 1, EXCESS_PB210), None);
    }

    #[test]
    fn test_age_warning_names_measured_intervals_only() {
        let file = Cell::Text("core_5.pdf".into());
        let msg = age_warning(&Cell::Number(5.0), &file, -0.5).unwrap();
        assert!(msg.contains("centered at 5.0"));
        assert!(age_warning(&Cell::Number(5.0), &file, 0.0).is_some());
        assert!(age_warning(&Cell::Number(5.0), &file, f64::NAN).is_some());
        assert!(age_warning(&Cell::Number(5.0), &file, 2.0).is_none());
        assert!(age_warning(&Cell::Number(9.0), &Cell::Empty, f64::NAN).is_none());
    }

    #[test]
    fn test_duplicate_matches_expand_rows() {
        let w = weights(&[(2.0, 1.0)]);
        let m = measurements(&[
            ("a_2.pdf", [3.0, 0.1, 1.0, 0.1, 1.0, 0.1]),
            ("b_2.pdf", [4.0, 0.1, 1.0, 0.1, 1.0, 0.1]),
        ]);
        let joined = join_on_center(&w, &m).unwrap();
        assert_eq!(joined.len(), 2);
    }

    #[test]
    fn test_non_positive_excess_propagates() {
        let w = weights(&[(1.0, 1.0), (2.0, 1.0), (3.0, 1.0)]);
        let m = measurements(&[
            ("core_1.pdf", [4.0, 0.1, 1.0, 0.1, 1.0, 0.1]),
            ("core_2.pdf", [1.0, 0.1, 1.0, 0.1, 1.0, 0.1]),
            ("core_3.pdf", [0.5, 0.1, 1.0, 0.1, 1.0, 0.1]),
        ]);
        let p = compute_profile(&w, &m, &DatingConstants::default(), 2020.0).unwrap();

        assert_eq!(value(&p, 1, EXCESS_PB210), Some(0.0));
        assert_eq!(value(&p, 1, AGE_BP), Some(f64::INFINITY));
        assert_eq!(value(&p, 2, EXCESS_PB210), Some(-0.5));
        assert_eq!(value(&p, 2, AGE_BP), None);
    }

    #[test]
    fn test_custom_constants() {
        let w = weights(&[(1.0, 1.0)]);
        let m = measurements(&[("core_1.pdf", [10.0, 0.1, 0.0, 0.0, 0.0, 0.0])]);
        let constants = DatingConstants {
            reference_activity: 151031.56 * 2.0,
            decay_constant: 0.03114,
        };
        let p = compute_profile(&w, &m, &constants, 2020.0).unwrap();
        assert_eq!(value(&p, 0, CORRECTION_FACTOR), Some(0.5));
        assert_eq!(value(&p, 0, CORRECTED_PB210), Some(20.0));
    }

    #[test]
    fn test_missing_weight_column() {
        let w = Table::new(vec![CENTER_COLUMN.into()]);
        let m = measurements(&[]);
        let err = compute_profile(&w, &m, &DatingConstants::default(), 2020.0).unwrap_err();
        assert!(matches!(err, PbDateError::MissingColumn { ref column, .. } if column == WEIGHT_COLUMN));
    }

    #[test]
    fn test_empty_weights_gives_header_only() {
        let p = compute_profile(&weights(&[]), &measurements(&[]), &DatingConstants::default(), 2020.0)
            .unwrap();
        assert!(p.is_empty());
        assert_eq!(p.columns().last().map(|s| s.as_str()), Some(CALENDAR_YEARS));
    }

    #[test]
    fn test_clashing_measurement_column_is_renamed() {
        let mut w = Table::new(vec![
            CENTER_COLUMN.into(),
            WEIGHT_COLUMN.into(),
            POINT_SOURCE_COLUMN.into(),
            "Pb-210".into(),
        ]);
        w.push_row(vec![
            Cell::Number(1.0),
            Cell::Number(1.0),
            Cell::Number(151031.56),
            Cell::Text("lab note".into()),
        ]);
        let m = measurements(&[("core_1.pdf", [10.0, 0.1, 0.0, 0.0, 0.0, 0.0])]);
        let p = compute_profile(&w, &m, &DatingConstants::default(), 2020.0).unwrap();
        assert!(p.column_index("Pb-210 (measurement)").is_some());
        assert_eq!(value(&p, 0, PB210_ACTIVITY), Some(10.0));
    }
}
