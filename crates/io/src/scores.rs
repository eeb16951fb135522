//! Evaluation score file readers.
//!
//! Three vendor files feed the aggregator: `WIS_ratio.csv`, `MAPE.csv`, and
//! the wide-format `coverage.csv`. All are normalized here to the score and
//! coverage row types: models outside the configured list and negative
//! horizons are dropped, location codes are zero-padded, MAPE and coverage
//! values are scaled to percent, and the 95% coverage column is recast as
//! the state map's Coverage metric.

use std::path::Path;

use chrono::NaiveDate;
use hygeia_data::{
    CoverageRow, CoverageTable, Metric, ScoreRow, ScoreTable, pad_location_code,
};
use serde::Deserialize;
use tracing::debug;

use crate::error::IoError;
use crate::paths::DataPaths;
use crate::read;

#[derive(Debug, Deserialize)]
struct WisRecord {
    #[serde(rename = "Model")]
    model: String,
    reference_date: NaiveDate,
    location: String,
    horizon: i32,
    wis_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MapeRecord {
    #[serde(rename = "Model")]
    model: String,
    #[serde(rename = "Location")]
    location: String,
    reference_date: NaiveDate,
    horizon: i32,
    #[serde(rename = "MAPE")]
    mape: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CoverageRecord {
    #[serde(rename = "Model")]
    model: String,
    location: String,
    reference_date: NaiveDate,
    horizon: i32,
    #[serde(rename = "10_cov")]
    cov_10: Option<f64>,
    #[serde(rename = "20_cov")]
    cov_20: Option<f64>,
    #[serde(rename = "30_cov")]
    cov_30: Option<f64>,
    #[serde(rename = "40_cov")]
    cov_40: Option<f64>,
    #[serde(rename = "50_cov")]
    cov_50: Option<f64>,
    #[serde(rename = "60_cov")]
    cov_60: Option<f64>,
    #[serde(rename = "70_cov")]
    cov_70: Option<f64>,
    #[serde(rename = "80_cov")]
    cov_80: Option<f64>,
    #[serde(rename = "90_cov")]
    cov_90: Option<f64>,
    #[serde(rename = "95_cov")]
    cov_95: Option<f64>,
    #[serde(rename = "98_cov")]
    cov_98: Option<f64>,
}

impl CoverageRecord {
    fn levels(&self) -> [(u8, Option<f64>); 11] {
        [
            (10, self.cov_10),
            (20, self.cov_20),
            (30, self.cov_30),
            (40, self.cov_40),
            (50, self.cov_50),
            (60, self.cov_60),
            (70, self.cov_70),
            (80, self.cov_80),
            (90, self.cov_90),
            (95, self.cov_95),
            (98, self.cov_98),
        ]
    }
}

/// Rows recovered from the wide-format coverage file.
#[derive(Debug, Clone, Default)]
pub struct CoverageScores {
    /// Long-format rows, one per (record, nominal level).
    pub coverage: Vec<CoverageRow>,
    /// The 95% level recast as [`Metric::Coverage`] score rows.
    pub scores: Vec<ScoreRow>,
}

/// True when the row survives the shared cleaning filters.
fn keep_row(model: &str, horizon: i32, models: &[String]) -> Option<u8> {
    if !models.iter().any(|m| m == model) {
        return None;
    }
    u8::try_from(horizon).ok()
}

/// Reads WIS-to-baseline ratios. Scores are used as-is.
///
/// # Errors
///
/// The file is required: a missing file, absent column, or malformed record
/// is fatal.
pub fn read_wis_scores(path: &Path, models: &[String]) -> Result<Vec<ScoreRow>, IoError> {
    let mut reader = read::open_csv(path)?;
    read::require_columns(
        &mut reader,
        path,
        &["Model", "reference_date", "location", "horizon", "wis_ratio"],
    )?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for record in reader.deserialize() {
        let record: WisRecord = record.map_err(|e| IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let Some(horizon) = keep_row(&record.model, record.horizon, models) else {
            dropped += 1;
            continue;
        };
        let Some(score) = record.wis_ratio.filter(|s| s.is_finite()) else {
            dropped += 1;
            continue;
        };
        rows.push(ScoreRow::new(
            Metric::WisBaseline,
            record.model,
            pad_location_code(&record.location),
            record.reference_date,
            horizon,
            score,
        ));
    }

    debug!(path = %path.display(), rows = rows.len(), dropped, "loaded WIS/Baseline scores");
    Ok(rows)
}

/// Reads MAPE scores, scaling the fractional values to percent.
///
/// # Errors
///
/// The file is required: a missing file, absent column, or malformed record
/// is fatal.
pub fn read_mape_scores(path: &Path, models: &[String]) -> Result<Vec<ScoreRow>, IoError> {
    let mut reader = read::open_csv(path)?;
    read::require_columns(
        &mut reader,
        path,
        &["Model", "Location", "reference_date", "horizon", "MAPE"],
    )?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for record in reader.deserialize() {
        let record: MapeRecord = record.map_err(|e| IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let Some(horizon) = keep_row(&record.model, record.horizon, models) else {
            dropped += 1;
            continue;
        };
        let Some(score) = record.mape.filter(|s| s.is_finite()) else {
            dropped += 1;
            continue;
        };
        rows.push(ScoreRow::new(
            Metric::Mape,
            record.model,
            pad_location_code(&record.location),
            record.reference_date,
            horizon,
            score * 100.0,
        ));
    }

    debug!(path = %path.display(), rows = rows.len(), dropped, "loaded MAPE scores");
    Ok(rows)
}

/// Reads the wide-format coverage file, melting the nominal-level columns to
/// long-format rows (scaled to percent) and recasting the 95% column as
/// standard score rows.
///
/// # Errors
///
/// The file is required: a missing file, absent column, or malformed record
/// is fatal.
pub fn read_coverage_scores(path: &Path, models: &[String]) -> Result<CoverageScores, IoError> {
    let mut reader = read::open_csv(path)?;
    read::require_columns(
        &mut reader,
        path,
        &["Model", "location", "reference_date", "horizon", "95_cov"],
    )?;

    let mut out = CoverageScores::default();
    let mut dropped = 0usize;
    for record in reader.deserialize() {
        let record: CoverageRecord = record.map_err(|e| IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let Some(horizon) = keep_row(&record.model, record.horizon, models) else {
            dropped += 1;
            continue;
        };
        let location = pad_location_code(&record.location);

        for (level, value) in record.levels() {
            let Some(score) = value.filter(|s| s.is_finite()) else {
                continue;
            };
            out.coverage.push(CoverageRow::new(
                record.model.clone(),
                location.clone(),
                record.reference_date,
                horizon,
                level,
                score * 100.0,
            ));
        }

        if let Some(score) = record.cov_95.filter(|s| s.is_finite()) {
            out.scores.push(ScoreRow::new(
                Metric::Coverage,
                record.model.clone(),
                location,
                record.reference_date,
                horizon,
                score * 100.0,
            ));
        }
    }

    debug!(
        path = %path.display(),
        coverage_rows = out.coverage.len(),
        score_rows = out.scores.len(),
        dropped,
        "loaded interval coverage scores"
    );
    Ok(out)
}

/// Reads and normalizes all three score files into the aggregation tables.
///
/// # Errors
///
/// Propagates the first reader failure; all three files are required.
pub fn read_evaluation_scores(
    paths: &DataPaths,
    models: &[String],
) -> Result<(ScoreTable, CoverageTable), IoError> {
    let mut scores = read_wis_scores(&paths.wis_file(), models)?;
    scores.extend(read_mape_scores(&paths.mape_file(), models)?);

    let coverage = read_coverage_scores(&paths.coverage_file(), models)?;
    scores.extend(coverage.scores);

    Ok((ScoreTable::new(scores), CoverageTable::new(coverage.coverage)))
}
