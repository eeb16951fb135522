//! Location and risk-threshold reference file readers.

use std::collections::BTreeMap;
use std::path::Path;

use hygeia_data::{LocationInfo, RiskThresholds};
use serde::Deserialize;
use tracing::debug;

use crate::error::IoError;
use crate::read;

#[derive(Debug, Deserialize)]
struct LocationRecord {
    location: String,
    abbreviation: String,
    location_name: String,
    population: u64,
}

#[derive(Debug, Deserialize)]
struct ThresholdRecord {
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Medium")]
    medium: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Very High")]
    very_high: f64,
}

/// Reads the location reference list that defines the dashboard's location
/// grid. Every other table is keyed by the codes listed here.
///
/// # Errors
///
/// The file is required: a missing file, absent column, or malformed record
/// is fatal.
pub fn read_locations(path: &Path) -> Result<Vec<LocationInfo>, IoError> {
    let mut reader = read::open_csv(path)?;
    read::require_columns(
        &mut reader,
        path,
        &["location", "abbreviation", "location_name", "population"],
    )?;

    let mut locations = Vec::new();
    for record in reader.deserialize() {
        let record: LocationRecord = record.map_err(|e| IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        locations.push(LocationInfo {
            code: record.location,
            abbreviation: record.abbreviation,
            name: record.location_name,
            population: record.population,
        });
    }

    debug!(
        path = %path.display(),
        count = locations.len(),
        "loaded location reference list"
    );
    Ok(locations)
}

/// Reads per-location risk thresholds, keyed by location code as written in
/// the file.
///
/// # Errors
///
/// The file is required: a missing file, absent column, or malformed record
/// is fatal.
pub fn read_thresholds(path: &Path) -> Result<BTreeMap<String, RiskThresholds>, IoError> {
    let mut reader = read::open_csv(path)?;
    read::require_columns(&mut reader, path, &["Location", "Medium", "High", "Very High"])?;

    let mut thresholds = BTreeMap::new();
    for record in reader.deserialize() {
        let record: ThresholdRecord = record.map_err(|e| IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        thresholds.insert(
            record.location,
            RiskThresholds {
                medium: record.medium,
                high: record.high,
                very_high: record.very_high,
            },
        );
    }

    debug!(
        path = %path.display(),
        count = thresholds.len(),
        "loaded risk thresholds"
    );
    Ok(thresholds)
}
