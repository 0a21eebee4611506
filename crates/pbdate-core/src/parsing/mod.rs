pub mod identifier;
pub mod values;

use serde::{Deserialize, Serialize};

use crate::config::ReportLayout;
use crate::error::ExtractionFailure;
use crate::extraction::PageContent;
use crate::model::{Isotope, Measurement, MeasurementRecord, ReportKind};
use values::parse_measurement;

/// Which two tokens of a labeled line hold (value, uncertainty).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPosition {
    /// The last two whitespace-separated tokens of the line.
    #[default]
    Trailing,
    /// The two tokens right after the token carrying the label.
    AfterLabel,
}

/// A labeled line in the isotope table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRule {
    pub isotope: Isotope,
    pub position: TokenPosition,
}

impl LineRule {
    pub const TOKEN_COUNT: usize = 2;

    pub fn matches(&self, line: &str) -> bool {
        line.contains(self.isotope.label())
    }

    /// Pick the (value, uncertainty) tokens out of a matching line.
    pub fn select<'a>(&self, line: &'a str) -> Result<(&'a str, &'a str), ExtractionFailure> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let pair = match self.position {
            TokenPosition::Trailing => tokens
                .len()
                .checked_sub(Self::TOKEN_COUNT)
                .map(|start| &tokens[start..]),
            TokenPosition::AfterLabel => tokens
                .iter()
                .position(|t| t.contains(self.isotope.label()))
                .map(|idx| &tokens[idx + 1..])
                .filter(|rest| rest.len() >= Self::TOKEN_COUNT)
                .map(|rest| &rest[..Self::TOKEN_COUNT]),
        };
        match pair {
            Some(&[value, uncertainty]) => Ok((value, uncertainty)),
            _ => Err(ExtractionFailure::MalformedLine {
                isotope: self.isotope,
                line: line.trim().to_string(),
            }),
        }
    }
}

/// Rules for a report kind, in the priority order they claim lines.
pub fn rules_for(kind: ReportKind, position: TokenPosition) -> Vec<LineRule> {
    kind.required_isotopes()
        .iter()
        .map(|&isotope| LineRule { isotope, position })
        .collect()
}

/// Extract a measurement record from the pages of one report.
pub fn extract_record(
    pages: &[PageContent],
    kind: ReportKind,
    layout: &ReportLayout,
) -> Result<MeasurementRecord, ExtractionFailure> {
    let required = layout.page_index + 1;
    let page = pages.get(layout.page_index).ok_or(ExtractionFailure::TooShort {
        pages: pages.len(),
        required,
    })?;
    let lines: Vec<&str> = page.lines.iter().map(|s| s.as_str()).collect();
    let rules = rules_for(kind, layout.position);

    match kind {
        ReportKind::PointSource => {
            let pb210 = scan_first(&lines, &rules[0])?;
            Ok(MeasurementRecord::PointSource { pb210 })
        }
        ReportKind::Regular => {
            let found = scan_all(&lines, &rules)?;
            let mut measurements = Vec::with_capacity(found.len());
            for (rule, tokens) in rules.iter().zip(&found) {
                match tokens {
                    Some((value, uncertainty)) => {
                        measurements.push((rule.isotope, *value, *uncertainty))
                    }
                    None => return Err(ExtractionFailure::IsotopeNotFound(rule.isotope)),
                }
            }
            let mut parsed = Vec::with_capacity(measurements.len());
            for (isotope, value, uncertainty) in measurements {
                parsed.push(parse_measurement(isotope, value, uncertainty)?);
            }
            Ok(MeasurementRecord::Regular {
                pb210: parsed[0],
                bi214: parsed[1],
                pb214: parsed[2],
            })
        }
    }
}

/// Return the first line matching `rule`, parsed.
fn scan_first(lines: &[&str], rule: &LineRule) -> Result<Measurement, ExtractionFailure> {
    let line = lines
        .iter()
        .find(|line| rule.matches(line))
        .ok_or(ExtractionFailure::IsotopeNotFound(rule.isotope))?;
    let (value, uncertainty) = rule.select(line)?;
    parse_measurement(rule.isotope, value, uncertainty)
}

/// Scan every line, letting the first matching rule claim it. Later lines
/// for the same isotope replace earlier ones.
fn scan_all<'a>(
    lines: &[&'a str],
    rules: &[LineRule],
) -> Result<Vec<Option<(&'a str, &'a str)>>, ExtractionFailure> {
    let mut found = vec![None; rules.len()];
    for &line in lines {
        if let Some(i) = rules.iter().position(|r| r.matches(line)) {
            found[i] = Some(rules[i].select(line)?);
        }
    }
    Ok(found)
}
