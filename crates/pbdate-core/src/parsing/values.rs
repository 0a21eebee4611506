use crate::error::ExtractionFailure;
use crate::model::{Isotope, Measurement};

/// Parse a report number token.
///
/// Handles plain and exponent forms as printed by the spectroscopy
/// software: "46.5", "1.234E+02", "-0.7".
pub fn parse_number(isotope: Isotope, token: &str) -> Result<f64, ExtractionFailure> {
    token
        .trim()
        .parse::<f64>()
        .map_err(|_| ExtractionFailure::InvalidNumber {
            isotope,
            token: token.to_string(),
        })
}

/// Parse a (value, uncertainty) token pair.
pub fn parse_measurement(
    isotope: Isotope,
    value: &str,
    uncertainty: &str,
) -> Result<Measurement, ExtractionFailure> {
    Ok(Measurement {
        value: parse_number(isotope, value)?,
        uncertainty: parse_number(isotope, uncertainty)?,
    })
}
