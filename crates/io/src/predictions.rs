//! Forecast submission readers.
//!
//! Each model publishes weekly CSVs under `unprocessed/<model>/`, with older
//! seasons under `archive/<model>/` in the legacy column layout. Both feed
//! the same per-model pivot keyed by (reference date, target date, location):
//! quantile rows become prediction rows, and same-week rate-change rows are
//! averaged into nowcast trends. A model with neither directory is skipped;
//! a run that yields no predictions at all is fatal.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use hygeia_data::{
    NowcastRow, NowcastTrend, PredictionRow, PredictionTable, QuantileLevel, QuantileSet,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::IoError;
use crate::paths::DataPaths;
use crate::read;

/// Weekly incident hospitalization target in current-era submissions.
const HOSPITALIZATION_TARGET: &str = "wk inc flu hosp";
/// Same-week rate-change target feeding the nowcast map.
const RATE_CHANGE_TARGET: &str = "wk flu hosp rate change";

type PivotKey = (NaiveDate, NaiveDate, String);
type TrendKey = (NaiveDate, String);

/// Current-era submission row. Dates and values stay as strings here:
/// other targets in the same file (peak-week rows) carry NA dates and
/// non-numeric values, so fields are parsed only after the target filter.
#[derive(Debug, Deserialize)]
struct SubmissionRecord {
    reference_date: String,
    target: String,
    target_end_date: String,
    location: String,
    output_type_id: String,
    value: String,
}

/// Legacy archive row: `forecast_date` instead of `reference_date`, and a
/// `quantile` column that is empty on point-forecast rows.
#[derive(Debug, Deserialize)]
struct ArchiveRecord {
    forecast_date: String,
    target: String,
    target_end_date: String,
    location: String,
    quantile: String,
    value: String,
}

#[derive(Debug, Default)]
struct OutcomeSum {
    total: f64,
    count: u32,
}

impl OutcomeSum {
    fn record(&mut self, value: f64) {
        self.total += value;
        self.count += 1;
    }

    /// Mean of the recorded values, or 0.0 when the outcome never appeared.
    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / f64::from(self.count)
        }
    }
}

/// Running sums for the three rate-change outcomes of one nowcast cell.
/// The `large_` variants are folded into their base outcome before
/// recording, so both contribute to the same mean.
#[derive(Debug, Default)]
struct TrendSums {
    stable: OutcomeSum,
    increase: OutcomeSum,
    decrease: OutcomeSum,
}

/// Everything recovered from the per-model submission directories.
#[derive(Debug, Clone, Default)]
pub struct SubmissionData {
    pub predictions: PredictionTable,
    pub nowcasts: Vec<NowcastRow>,
}

/// Reads every model's current and archived submissions.
///
/// Archive directories are read after the current-era directory, so where
/// both carry the same pivot cell the archived value wins. Malformed records
/// are skipped and counted rather than failing the run.
///
/// # Errors
///
/// Fails when a submission file cannot be opened or is missing a required
/// column, or when no model contributed a single prediction row.
pub fn read_predictions(
    paths: &DataPaths,
    models: &[String],
    nowcast_models: &[String],
) -> Result<SubmissionData, IoError> {
    let mut rows = Vec::new();
    let mut nowcast_rows = Vec::new();

    for model in models {
        let nowcast_capable = nowcast_models.iter().any(|m| m == model);
        let mut pivot: BTreeMap<PivotKey, QuantileSet> = BTreeMap::new();
        let mut trends: BTreeMap<TrendKey, TrendSums> = BTreeMap::new();
        let mut skipped = 0usize;

        let submission_files = read::csv_files(&paths.submission_dir(model))?;
        for file in &submission_files {
            read_submission_file(file, nowcast_capable, &mut pivot, &mut trends, &mut skipped)?;
        }
        let archive_files = read::csv_files(&paths.archive_dir(model))?;
        for file in &archive_files {
            read_archive_file(file, &mut pivot, &mut skipped)?;
        }

        let cells = pivot.len();
        for ((reference, target, location), quantiles) in pivot {
            if let Some(row) =
                PredictionRow::new(model.clone(), location, reference, target, quantiles)
            {
                rows.push(row);
            }
        }
        for ((reference, location), sums) in trends {
            nowcast_rows.push(NowcastRow {
                model: model.clone(),
                location,
                reference_date: reference,
                trend: NowcastTrend {
                    decrease: sums.decrease.mean(),
                    increase: sums.increase.mean(),
                    stable: sums.stable.mean(),
                },
            });
        }

        debug!(
            model = %model,
            submission_files = submission_files.len(),
            archive_files = archive_files.len(),
            cells,
            skipped,
            "read model submissions"
        );
    }

    if rows.is_empty() {
        return Err(IoError::NoPredictions {
            path: paths.root().to_path_buf(),
        });
    }

    info!(
        predictions = rows.len(),
        nowcasts = nowcast_rows.len(),
        "loaded forecast submissions"
    );
    Ok(SubmissionData {
        predictions: PredictionTable::new(rows),
        nowcasts: nowcast_rows,
    })
}

fn read_submission_file(
    path: &Path,
    nowcast_capable: bool,
    pivot: &mut BTreeMap<PivotKey, QuantileSet>,
    trends: &mut BTreeMap<TrendKey, TrendSums>,
    skipped: &mut usize,
) -> Result<(), IoError> {
    let mut reader = read::open_csv(path)?;
    read::require_columns(
        &mut reader,
        path,
        &[
            "reference_date",
            "target",
            "target_end_date",
            "location",
            "output_type_id",
            "value",
        ],
    )?;

    for record in reader.deserialize() {
        let record: SubmissionRecord = match record {
            Ok(record) => record,
            Err(_) => {
                *skipped += 1;
                continue;
            }
        };
        match record.target.as_str() {
            HOSPITALIZATION_TARGET => {
                let Some(level) = QuantileLevel::from_label(&record.output_type_id) else {
                    continue;
                };
                let Some((reference, target)) =
                    parse_date_pair(&record.reference_date, &record.target_end_date)
                else {
                    *skipped += 1;
                    continue;
                };
                let Ok(value) = record.value.trim().parse::<f64>() else {
                    *skipped += 1;
                    continue;
                };
                if !value.is_finite() {
                    *skipped += 1;
                    continue;
                }
                pivot
                    .entry((reference, target, record.location))
                    .or_default()
                    .set(level, value);
            }
            RATE_CHANGE_TARGET => {
                if !nowcast_capable {
                    continue;
                }
                let Some((reference, target)) =
                    parse_date_pair(&record.reference_date, &record.target_end_date)
                else {
                    *skipped += 1;
                    continue;
                };
                // Only the same-week nowcast is kept.
                if target != reference {
                    continue;
                }
                // The cell is created before the outcome is matched, so a
                // key seen only with unknown categories still emits an
                // all-zero trend.
                let sums = trends.entry((reference, record.location)).or_default();
                let Ok(value) = record.value.trim().parse::<f64>() else {
                    *skipped += 1;
                    continue;
                };
                if !value.is_finite() {
                    continue;
                }
                let outcome = record
                    .output_type_id
                    .strip_prefix("large_")
                    .unwrap_or(&record.output_type_id);
                match outcome {
                    "stable" => sums.stable.record(value),
                    "increase" => sums.increase.record(value),
                    "decrease" => sums.decrease.record(value),
                    _ => {}
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn read_archive_file(
    path: &Path,
    pivot: &mut BTreeMap<PivotKey, QuantileSet>,
    skipped: &mut usize,
) -> Result<(), IoError> {
    let mut reader = read::open_csv(path)?;
    read::require_columns(
        &mut reader,
        path,
        &[
            "forecast_date",
            "target",
            "target_end_date",
            "location",
            "quantile",
            "value",
        ],
    )?;

    for record in reader.deserialize() {
        let record: ArchiveRecord = match record {
            Ok(record) => record,
            Err(_) => {
                *skipped += 1;
                continue;
            }
        };
        // Legacy targets spell out the horizon ("1 wk ahead inc flu hosp").
        if !record.target.contains("inc flu hosp") {
            continue;
        }
        let Some(level) = QuantileLevel::from_label(&record.quantile) else {
            // point forecasts have no quantile
            continue;
        };
        let Some((reference, target)) =
            parse_date_pair(&record.forecast_date, &record.target_end_date)
        else {
            *skipped += 1;
            continue;
        };
        let Ok(value) = record.value.trim().parse::<f64>() else {
            *skipped += 1;
            continue;
        };
        if !value.is_finite() {
            *skipped += 1;
            continue;
        }
        pivot
            .entry((reference, target, record.location))
            .or_default()
            .set(level, value);
    }
    Ok(())
}

fn parse_date_pair(reference: &str, target: &str) -> Option<(NaiveDate, NaiveDate)> {
    let reference = reference.trim().parse().ok()?;
    let target = target.trim().parse().ok()?;
    Some((reference, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_mean_defaults_to_zero() {
        assert_eq!(OutcomeSum::default().mean(), 0.0);
    }

    #[test]
    fn outcome_mean_averages_samples() {
        let mut sum = OutcomeSum::default();
        sum.record(0.3);
        sum.record(0.1);
        assert!((sum.mean() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn date_pair_rejects_na() {
        assert!(parse_date_pair("NA", "2024-01-06").is_none());
        assert!(parse_date_pair("2024-01-06", "NA").is_none());
        assert!(
            parse_date_pair("2024-01-06", "2024-01-13")
                .is_some_and(|(r, t)| t > r)
        );
    }
}
