//! Dashboard document assembly and JSON writing.
//!
//! The pipeline emits two documents: the core document (season metadata,
//! nowcast trends, ground truth, prediction timelines, and auxiliary
//! reference data) and the evaluations document (precomputed aggregate views
//! plus raw score listings). The structures here pin the exact key names the
//! dashboard reads; dates serialize as plain `YYYY-MM-DD` strings throughout.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use hygeia_data::{LocationInfo, NowcastRow, NowcastTrend, RiskThresholds};
use hygeia_evaluate::{CoverageWindow, EvaluationSummary, RawScores, StateMapWindow, WindowIqr};
use hygeia_seasons::{DynamicPeriod, Season};
use hygeia_timeline::{SeasonGroundTruth, SeasonTimeline};
use serde::Serialize;
use tracing::info;

use crate::error::IoError;
use crate::ground_truth::HistoricalSnapshots;

/// model → reference date → location → trend probabilities.
pub type NowcastTrends = BTreeMap<String, BTreeMap<NaiveDate, BTreeMap<String, NowcastTrend>>>;

/// One entry of the season selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonOption {
    pub index: usize,
    pub display_string: String,
    /// `start/end` ISO pair, the selector's stable value.
    pub time_value: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl SeasonOption {
    pub fn from_season(season: &Season) -> Self {
        Self {
            index: season.index(),
            display_string: season.display_label(),
            time_value: season.time_value(),
            start_date: season.start(),
            end_date: season.end(),
        }
    }
}

/// One entry of the trailing-weeks selector. Indexed independently of the
/// season options and keyed by a stable label instead of a time value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicPeriodOption {
    pub index: usize,
    pub label: String,
    pub display_string: String,
    pub is_dynamic: bool,
    pub sub_display_value: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DynamicPeriodOption {
    pub fn from_period(period: &DynamicPeriod) -> Self {
        Self {
            index: period.index(),
            label: period.id().to_string(),
            display_string: period.display_name().to_string(),
            is_dynamic: true,
            sub_display_value: period.display_range(),
            start_date: period.start(),
            end_date: period.end(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonsMetadata {
    pub full_range_seasons: Vec<SeasonOption>,
    pub dynamic_time_period: Vec<DynamicPeriodOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub seasons: SeasonsMetadata,
    pub model_names: Vec<String>,
    /// The most recent full-range season's time value, or empty when no
    /// seasons exist. The dashboard opens on this selection.
    pub default_season_time_value: String,
}

impl Metadata {
    pub fn build(seasons: &[Season], periods: &[DynamicPeriod], model_names: &[String]) -> Self {
        let full_range_seasons: Vec<SeasonOption> =
            seasons.iter().map(SeasonOption::from_season).collect();
        let default_season_time_value = full_range_seasons
            .last()
            .map(|option| option.time_value.clone())
            .unwrap_or_default();

        Self {
            seasons: SeasonsMetadata {
                full_range_seasons,
                dynamic_time_period: periods.iter().map(DynamicPeriodOption::from_period).collect(),
            },
            model_names: model_names.to_vec(),
            default_season_time_value,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MainData {
    pub nowcast_trends: NowcastTrends,
    pub historical_data_map: HistoricalSnapshots,
    /// season time value → surveillance grid.
    pub ground_truth_data: BTreeMap<String, SeasonGroundTruth>,
    /// season time value → partitioned prediction timelines.
    pub prediction_data: BTreeMap<String, SeasonTimeline>,
}

/// One location as the dashboard's selector lists it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationOption {
    pub state_num: String,
    pub state: String,
    pub state_name: String,
    pub population: u64,
}

impl LocationOption {
    pub fn from_info(info: &LocationInfo) -> Self {
        Self {
            state_num: info.code.clone(),
            state: info.abbreviation.clone(),
            state_name: info.name.clone(),
            population: info.population,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuxiliaryData {
    pub locations: Vec<LocationOption>,
    /// Keyed by location code as written in the thresholds file.
    pub thresholds: BTreeMap<String, RiskThresholds>,
}

/// The core data document.
#[derive(Debug, Clone, Serialize)]
pub struct AppDataCore {
    pub metadata: Metadata,
    #[serde(rename = "mainData")]
    pub main_data: MainData,
    #[serde(rename = "auxiliary-data")]
    pub auxiliary: AuxiliaryData,
}

#[derive(Debug, Clone, Serialize)]
pub struct Precalculated {
    pub iqr: BTreeMap<String, WindowIqr>,
    #[serde(rename = "stateMap_aggregates")]
    pub state_map_aggregates: BTreeMap<String, StateMapWindow>,
    #[serde(rename = "detailedCoverage_aggregates")]
    pub detailed_coverage_aggregates: BTreeMap<String, CoverageWindow>,
}

/// The evaluations document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDataEvaluations {
    pub precalculated: Precalculated,
    pub raw_scores: RawScores,
}

impl AppDataEvaluations {
    pub fn from_summary(summary: EvaluationSummary) -> Self {
        Self {
            precalculated: Precalculated {
                iqr: summary.iqr,
                state_map_aggregates: summary.state_map,
                detailed_coverage_aggregates: summary.coverage,
            },
            raw_scores: summary.raw_scores,
        }
    }
}

/// Nests flat nowcast rows into the document's model/date/location map.
pub fn nowcast_trend_map(rows: &[NowcastRow]) -> NowcastTrends {
    let mut map = NowcastTrends::new();
    for row in rows {
        map.entry(row.model.clone())
            .or_default()
            .entry(row.reference_date)
            .or_default()
            .insert(row.location.clone(), row.trend);
    }
    map
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| IoError::Write {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
    }
    let file = File::create(path).map_err(|e| IoError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut writer = BufWriter::new(file);
    // Compact output: these documents are fetched by the dashboard, not read
    // by people.
    serde_json::to_writer(&mut writer, value).map_err(|e| IoError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    writer.flush().map_err(|e| IoError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Writes the core document, creating parent directories as needed.
///
/// # Errors
///
/// Fails when the directory cannot be created or the file cannot be written.
pub fn write_core_document(path: &Path, document: &AppDataCore) -> Result<(), IoError> {
    write_json(path, document)?;
    info!(path = %path.display(), "wrote core data document");
    Ok(())
}

/// Writes the evaluations document, creating parent directories as needed.
///
/// # Errors
///
/// Fails when the directory cannot be created or the file cannot be written.
pub fn write_evaluations_document(
    path: &Path,
    document: &AppDataEvaluations,
) -> Result<(), IoError> {
    write_json(path, document)?;
    info!(path = %path.display(), "wrote evaluations document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hygeia_data::DateExtent;
    use hygeia_seasons::{generate_seasons, trailing_periods};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn metadata_defaults_to_last_season() {
        let extent = DateExtent::new(date(2023, 10, 14), date(2024, 11, 23)).unwrap();
        let seasons = generate_seasons(extent);
        let periods = trailing_periods(Some(date(2024, 11, 23)));
        let metadata = Metadata::build(&seasons, &periods, &["m1".to_string()]);

        let last = metadata.seasons.full_range_seasons.last().unwrap();
        assert_eq!(metadata.default_season_time_value, last.time_value);
        assert_eq!(metadata.model_names, vec!["m1".to_string()]);
        assert!(!metadata.seasons.dynamic_time_period.is_empty());
    }

    #[test]
    fn metadata_with_no_seasons_has_empty_default() {
        let metadata = Metadata::build(&[], &[], &[]);
        assert_eq!(metadata.default_season_time_value, "");
    }

    #[test]
    fn season_option_serializes_camel_case() {
        let extent = DateExtent::new(date(2023, 10, 14), date(2024, 4, 6)).unwrap();
        let seasons = generate_seasons(extent);
        let json = serde_json::to_string(&SeasonOption::from_season(&seasons[0])).unwrap();

        assert!(json.contains("\"displayString\""));
        assert!(json.contains("\"timeValue\""));
        assert!(json.contains("\"startDate\""));
        assert!(json.contains("\"endDate\""));
    }

    #[test]
    fn period_option_is_dynamic_without_time_value() {
        let periods = trailing_periods(Some(date(2024, 11, 23)));
        let json = serde_json::to_string(&DynamicPeriodOption::from_period(&periods[0])).unwrap();

        assert!(json.contains("\"isDynamic\":true"));
        assert!(json.contains("\"subDisplayValue\""));
        assert!(json.contains("\"label\""));
        assert!(!json.contains("timeValue"));
    }

    #[test]
    fn nowcast_map_nests_by_model_date_location() {
        let rows = vec![
            NowcastRow {
                model: "m1".into(),
                location: "06".into(),
                reference_date: date(2024, 11, 23),
                trend: NowcastTrend {
                    decrease: 0.1,
                    increase: 0.2,
                    stable: 0.7,
                },
            },
            NowcastRow {
                model: "m1".into(),
                location: "US".into(),
                reference_date: date(2024, 11, 23),
                trend: NowcastTrend::default(),
            },
        ];

        let map = nowcast_trend_map(&rows);
        assert_eq!(map.len(), 1);
        let by_date = &map["m1"][&date(2024, 11, 23)];
        assert_eq!(by_date.len(), 2);
        assert_eq!(by_date["06"].stable, 0.7);
    }

    #[test]
    fn core_document_uses_dashboard_keys() {
        let document = AppDataCore {
            metadata: Metadata::build(&[], &[], &[]),
            main_data: MainData {
                nowcast_trends: NowcastTrends::new(),
                historical_data_map: HistoricalSnapshots::new(),
                ground_truth_data: BTreeMap::new(),
                prediction_data: BTreeMap::new(),
            },
            auxiliary: AuxiliaryData {
                locations: vec![LocationOption {
                    state_num: "06".into(),
                    state: "CA".into(),
                    state_name: "California".into(),
                    population: 39_512_223,
                }],
                thresholds: BTreeMap::new(),
            },
        };

        let json = serde_json::to_string(&document).unwrap();
        assert!(json.contains("\"metadata\""));
        assert!(json.contains("\"mainData\""));
        assert!(json.contains("\"auxiliary-data\""));
        assert!(json.contains("\"nowcastTrends\""));
        assert!(json.contains("\"historicalDataMap\""));
        assert!(json.contains("\"groundTruthData\""));
        assert!(json.contains("\"predictionData\""));
        assert!(json.contains("\"stateNum\":\"06\""));
        assert!(json.contains("\"defaultSeasonTimeValue\":\"\""));
    }

    #[test]
    fn evaluations_document_uses_dashboard_keys() {
        let summary = EvaluationSummary::default();
        let json = serde_json::to_string(&AppDataEvaluations::from_summary(summary)).unwrap();

        assert!(json.contains("\"precalculated\""));
        assert!(json.contains("\"iqr\""));
        assert!(json.contains("\"stateMap_aggregates\""));
        assert!(json.contains("\"detailedCoverage_aggregates\""));
        assert!(json.contains("\"rawScores\""));
    }
}
