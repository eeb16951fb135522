//! Partition grid construction.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use hygeia_data::{GroundTruthTable, PredictionRow, PredictionTable, QuantileLevel};
use hygeia_seasons::Season;
use serde::Serialize;
use tracing::debug;

use crate::boundary::{ForecastBoundaries, PartitionKind};

/// The per-target-date view of one prediction row, in the dashboard's chart
/// shape. Absent quantiles default to 0.0.
///
/// `q05`/`q95` carry the 2.5% and 95% levels: the established chart contract
/// pairs the innermost band symmetrically (25/75) but the outer band reads
/// the extreme lower tail against the 95% upper tail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionSummary {
    pub horizon: u8,
    pub median: f64,
    pub q25: f64,
    pub q75: f64,
    pub q05: f64,
    pub q95: f64,
}

impl PredictionSummary {
    pub fn from_row(row: &PredictionRow) -> Self {
        Self {
            horizon: row.horizon,
            median: row.quantiles.get_or_zero(QuantileLevel::Q50),
            q25: row.quantiles.get_or_zero(QuantileLevel::Q25),
            q75: row.quantiles.get_or_zero(QuantileLevel::Q75),
            q05: row.quantiles.get_or_zero(QuantileLevel::Q2_5),
            q95: row.quantiles.get_or_zero(QuantileLevel::Q95),
        }
    }
}

/// One (date, location) cell of a partition grid. The predictions field is
/// omitted from serialization when the model has none there; the cell itself
/// is always present for every configured location.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimelineEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predictions: Option<BTreeMap<NaiveDate, PredictionSummary>>,
}

/// date → location → entry, for one partition.
pub type PartitionGrid = BTreeMap<NaiveDate, BTreeMap<String, TimelineEntry>>;

/// One model's partitioned timeline within a season.
///
/// `partitions` holds only the valid (non-degenerate) ranges; a skipped
/// range contributes no key at all.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelTimeline {
    pub first_pred_ref_date: NaiveDate,
    pub last_pred_ref_date: NaiveDate,
    pub last_pred_target_date: NaiveDate,
    pub partitions: BTreeMap<PartitionKind, PartitionGrid>,
}

/// A season's full timeline: season-level anchor dates plus one
/// [`ModelTimeline`] per configured model, flattened beside the date fields
/// exactly as the dashboard reads them.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonTimeline {
    #[serde(rename = "firstPredRefDate")]
    pub first_pred_ref_date: NaiveDate,
    #[serde(rename = "lastPredRefDate")]
    pub last_pred_ref_date: NaiveDate,
    #[serde(rename = "lastPredTargetDate")]
    pub last_pred_target_date: NaiveDate,
    #[serde(flatten)]
    pub models: BTreeMap<String, ModelTimeline>,
}

/// Builds the complete timeline for one season.
///
/// Every configured model gets a [`ModelTimeline`]; models without
/// predictions in the season keep sentinel anchors and an empty partition
/// map. Per-location misses inside a grid are expected sparsity, never
/// errors.
pub fn build_season_timeline(
    season: &Season,
    predictions: &PredictionTable,
    ground_truth: &GroundTruthTable,
    models: &[String],
    locations: &[String],
) -> SeasonTimeline {
    let in_season =
        |row: &&PredictionRow| season.contains(row.reference_date);

    let season_bounds =
        ForecastBoundaries::from_rows(predictions.rows().iter().filter(in_season), season);

    let mut timelines = BTreeMap::new();
    for model in models {
        let rows: Vec<&PredictionRow> = predictions
            .for_model(model)
            .iter()
            .filter(in_season)
            .collect();

        timelines.insert(
            model.clone(),
            build_model_timeline(season, &rows, ground_truth, model, locations),
        );
    }

    SeasonTimeline {
        first_pred_ref_date: season_bounds.first_reference,
        last_pred_ref_date: season_bounds.last_reference,
        last_pred_target_date: season_bounds.last_target,
        models: timelines,
    }
}

fn build_model_timeline(
    season: &Season,
    rows: &[&PredictionRow],
    ground_truth: &GroundTruthTable,
    model: &str,
    locations: &[String],
) -> ModelTimeline {
    let bounds = ForecastBoundaries::from_rows(rows.iter().copied(), season);

    let mut partitions = BTreeMap::new();
    if bounds.has_predictions() {
        // Index rows by (reference date, location) for grid fills.
        let mut by_date_location: BTreeMap<(NaiveDate, &str), Vec<&PredictionRow>> =
            BTreeMap::new();
        for row in rows {
            by_date_location
                .entry((row.reference_date, row.location.as_str()))
                .or_default()
                .push(row);
        }

        for (kind, range) in bounds.partition_ranges(season) {
            if !range.is_valid() {
                debug!(
                    season = season.id(),
                    model,
                    partition = %kind,
                    "skipping degenerate partition range"
                );
                continue;
            }

            // The grid's date axis is the union of ground-truth dates and
            // this model's reference dates inside the range.
            let mut dates: BTreeSet<NaiveDate> = ground_truth
                .dates()
                .filter(|d| range.contains(*d))
                .collect();
            dates.extend(
                rows.iter()
                    .map(|r| r.reference_date)
                    .filter(|d| range.contains(*d)),
            );

            let mut grid = PartitionGrid::new();
            for date in dates {
                let mut per_location = BTreeMap::new();
                for location in locations {
                    let mut entry = TimelineEntry::default();
                    if let Some(matched) = by_date_location.get(&(date, location.as_str())) {
                        let summaries: BTreeMap<NaiveDate, PredictionSummary> = matched
                            .iter()
                            .map(|row| (row.target_end_date, PredictionSummary::from_row(row)))
                            .collect();
                        if !summaries.is_empty() {
                            entry.predictions = Some(summaries);
                        }
                    }
                    per_location.insert(location.clone(), entry);
                }
                grid.insert(date, per_location);
            }
            partitions.insert(kind, grid);
        }
    } else {
        debug!(
            season = season.id(),
            model, "no predictions in season; all partitions skipped"
        );
    }

    ModelTimeline {
        first_pred_ref_date: bounds.first_reference,
        last_pred_ref_date: bounds.last_reference,
        last_pred_target_date: bounds.last_target,
        partitions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hygeia_data::{DateExtent, QuantileSet};
    use hygeia_seasons::generate_seasons;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn summary_row(median: f64) -> PredictionRow {
        let mut quantiles = QuantileSet::default();
        quantiles.set(QuantileLevel::Q2_5, median - 2.0);
        quantiles.set(QuantileLevel::Q25, median - 1.0);
        quantiles.set(QuantileLevel::Q50, median);
        quantiles.set(QuantileLevel::Q75, median + 1.0);
        quantiles.set(QuantileLevel::Q95, median + 2.0);
        quantiles.set(QuantileLevel::Q97_5, median + 3.0);
        PredictionRow::new(
            "m".to_string(),
            "US".to_string(),
            date(2024, 1, 6),
            date(2024, 1, 13),
            quantiles,
        )
        .unwrap()
    }

    #[test]
    fn summary_reads_canonical_levels() {
        let row = summary_row(10.0);
        let summary = PredictionSummary::from_row(&row);

        assert_eq!(summary.horizon, 1);
        assert_eq!(summary.median, 10.0);
        assert_eq!(summary.q25, 9.0);
        assert_eq!(summary.q75, 11.0);
        // Lower band reads the 2.5% level, upper band the 95% level.
        assert_eq!(summary.q05, 8.0);
        assert_eq!(summary.q95, 12.0);
    }

    #[test]
    fn summary_defaults_missing_levels_to_zero() {
        let mut quantiles = QuantileSet::default();
        quantiles.set(QuantileLevel::Q50, 5.0);
        let row = PredictionRow::new(
            "m".to_string(),
            "US".to_string(),
            date(2024, 1, 6),
            date(2024, 1, 6),
            quantiles,
        )
        .unwrap();

        let summary = PredictionSummary::from_row(&row);
        assert_eq!(summary.median, 5.0);
        assert_eq!(summary.q25, 0.0);
        assert_eq!(summary.q95, 0.0);
    }

    #[test]
    fn entry_serialization_omits_absent_predictions() {
        let empty = TimelineEntry::default();
        assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");

        let mut summaries = BTreeMap::new();
        summaries.insert(
            date(2024, 1, 13),
            PredictionSummary {
                horizon: 1,
                median: 10.0,
                q25: 9.0,
                q75: 11.0,
                q05: 8.0,
                q95: 12.0,
            },
        );
        let filled = TimelineEntry {
            predictions: Some(summaries),
        };
        let json = serde_json::to_string(&filled).unwrap();
        assert!(json.contains("\"predictions\""));
        assert!(json.contains("\"2024-01-13\""));
    }

    #[test]
    fn season_timeline_serializes_models_beside_anchor_dates() {
        let extent = DateExtent::new(date(2023, 8, 1), date(2024, 7, 31)).unwrap();
        let season = generate_seasons(extent).pop().unwrap();
        let predictions = PredictionTable::new(vec![summary_row(10.0)]);
        let ground_truth = GroundTruthTable::default();

        let timeline = build_season_timeline(
            &season,
            &predictions,
            &ground_truth,
            &["m".to_string()],
            &["US".to_string()],
        );
        let value = serde_json::to_value(&timeline).unwrap();

        assert_eq!(value["firstPredRefDate"], "2024-01-06");
        assert_eq!(value["lastPredRefDate"], "2024-01-06");
        assert_eq!(value["lastPredTargetDate"], "2024-01-13");
        assert!(value["m"]["partitions"]["full-forecast"].is_object());
    }
}
