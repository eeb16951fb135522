//! Ground-truth surveillance readers: the current extract and the dated
//! historical snapshots.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use hygeia_data::{Admissions, GroundTruthRow, ReportedAdmissions, pad_location_code};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::IoError;
use crate::read;

/// Revision history of the ground truth: snapshot date, then observation
/// date, then location.
pub type HistoricalSnapshots =
    BTreeMap<NaiveDate, BTreeMap<NaiveDate, BTreeMap<String, ReportedAdmissions>>>;

const SURVEILLANCE_COLUMNS: [&str; 4] = ["date", "location", "value", "weekly_rate"];

#[derive(Debug, Deserialize)]
struct SurveillanceRecord {
    date: NaiveDate,
    location: String,
    value: Option<f64>,
    weekly_rate: Option<f64>,
}

/// Reads the current surveillance extract.
///
/// Rows without an admissions count are dropped; a missing weekly rate reads
/// as 0.0. Negative admission counts are carried as
/// [`Admissions::Missing`] so downstream views can exclude them.
///
/// # Errors
///
/// The file is required: a missing file or absent column is fatal. Rows
/// that fail to parse are skipped and counted.
pub fn read_ground_truth(path: &Path) -> Result<Vec<GroundTruthRow>, IoError> {
    let mut reader = read::open_csv(path)?;
    read::require_columns(&mut reader, path, &SURVEILLANCE_COLUMNS)?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader.deserialize::<SurveillanceRecord>() {
        let Ok(record) = record else {
            skipped += 1;
            continue;
        };
        let Some(value) = record.value else {
            skipped += 1;
            continue;
        };
        rows.push(GroundTruthRow {
            date: record.date,
            location: record.location,
            admissions: Admissions::from_raw(value),
            weekly_rate: record.weekly_rate.unwrap_or(0.0),
        });
    }

    if skipped > 0 {
        debug!(
            path = %path.display(),
            skipped,
            "dropped surveillance rows without admissions"
        );
    }
    debug!(
        path = %path.display(),
        rows = rows.len(),
        "loaded ground-truth observations"
    );
    Ok(rows)
}

/// Reads every dated snapshot file under `dir` into the revision map.
///
/// File names carry the snapshot date after the final underscore
/// (`target-hospital-admissions_2024-10-26.csv`). Files with unparsable
/// names or missing columns are skipped with a warning, as are rows with
/// negative or absent values. A missing directory yields an empty map.
///
/// # Errors
///
/// Returns [`IoError::Read`] only when the directory exists but cannot be
/// listed; individual files never abort the scan.
pub fn read_historical_snapshots(dir: &Path) -> Result<HistoricalSnapshots, IoError> {
    let mut snapshots = HistoricalSnapshots::new();
    let files = read::csv_files(dir)?;
    if files.is_empty() {
        debug!(dir = %dir.display(), "no historical snapshot files");
        return Ok(snapshots);
    }

    for path in files {
        let Some(snapshot_date) = snapshot_date_from_name(&path) else {
            warn!(
                file = %path.display(),
                "cannot parse a snapshot date from the file name; skipping"
            );
            continue;
        };

        let mut reader = match read::open_csv(&path) {
            Ok(reader) => reader,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "cannot open snapshot file; skipping");
                continue;
            }
        };
        let headers = match reader.headers() {
            Ok(headers) => headers,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "cannot read snapshot header; skipping");
                continue;
            }
        };
        if let Some(column) = read::missing_column(headers, &SURVEILLANCE_COLUMNS) {
            warn!(
                file = %path.display(),
                column,
                "snapshot file lacks a required column; skipping"
            );
            continue;
        }

        let mut kept = 0usize;
        let mut skipped = 0usize;
        for record in reader.deserialize::<SurveillanceRecord>() {
            let Ok(record) = record else {
                skipped += 1;
                continue;
            };
            let (Some(value), Some(weekly_rate)) = (record.value, record.weekly_rate) else {
                skipped += 1;
                continue;
            };
            // Negative counts and rates are data errors in a snapshot, not
            // missing-value sentinels.
            if !value.is_finite() || !weekly_rate.is_finite() || value < 0.0 || weekly_rate < 0.0 {
                skipped += 1;
                continue;
            }
            snapshots
                .entry(snapshot_date)
                .or_default()
                .entry(record.date)
                .or_default()
                .insert(
                    pad_location_code(&record.location),
                    ReportedAdmissions {
                        admissions: value,
                        weekly_rate,
                    },
                );
            kept += 1;
        }
        debug!(
            file = %path.display(),
            snapshot = %snapshot_date,
            kept,
            skipped,
            "loaded historical snapshot"
        );
    }

    debug!(
        dir = %dir.display(),
        snapshots = snapshots.len(),
        "loaded historical ground-truth snapshots"
    );
    Ok(snapshots)
}

/// Extracts the snapshot date from a file name, taking whatever follows the
/// last underscore in the stem (or the whole stem when there is none).
fn snapshot_date_from_name(path: &Path) -> Option<NaiveDate> {
    let stem = path.file_stem()?.to_str()?;
    let raw = stem.rsplit_once('_').map_or(stem, |(_, tail)| tail);
    raw.parse().ok()
}
