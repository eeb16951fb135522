//! Location and risk-threshold reference data.

use serde::Serialize;

/// One entry from the locations reference file.
///
/// `code` is the two-character state identifier ("US" or a zero-padded FIPS
/// code) every other table keys locations by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationInfo {
    pub code: String,
    pub abbreviation: String,
    pub name: String,
    pub population: u64,
}

/// Hospitalization-rate risk thresholds for one location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskThresholds {
    pub medium: f64,
    pub high: f64,
    pub very_high: f64,
}

/// Normalizes a location code to the canonical two-character form by
/// left-padding short codes with zeros ("6" becomes "06"; "US" is unchanged).
pub fn pad_location_code(raw: &str) -> String {
    let trimmed = raw.trim();
    format!("{trimmed:0>2}")
}
