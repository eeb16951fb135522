//! Sum/count aggregation of scores within one window.

use std::collections::BTreeMap;

use hygeia_data::{CoverageTable, Metric, ScoreTable};
use serde::Serialize;

use crate::window::EvaluationWindow;

/// A mergeable partial mean. Persisting sum and count separately lets the
/// dashboard combine buckets (across horizons, or across windows) without
/// reweighting errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SumCount {
    pub sum: f64,
    pub count: u64,
}

impl SumCount {
    pub fn record(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn merge(&mut self, other: SumCount) {
        self.sum += other.sum;
        self.count += other.count;
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// metric → model → location → horizon → aggregate, for one window.
pub type StateMapWindow = BTreeMap<Metric, BTreeMap<String, BTreeMap<String, BTreeMap<u8, SumCount>>>>;

/// model → horizon → nominal level → aggregate, for one window.
pub type CoverageWindow = BTreeMap<String, BTreeMap<u8, BTreeMap<u8, SumCount>>>;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ScoreKey {
    metric: Metric,
    model: String,
    location: String,
    horizon: u8,
}

/// Aggregates the standard-metric scores falling inside `window`, keyed for
/// the dashboard's state-map view. Empty input yields an empty map.
pub fn state_map_for_window(window: &EvaluationWindow, scores: &ScoreTable) -> StateMapWindow {
    let mut flat: BTreeMap<ScoreKey, SumCount> = BTreeMap::new();
    for row in scores.rows() {
        if !window.contains_score(row.reference_date, row.target_end_date) {
            continue;
        }
        flat.entry(ScoreKey {
            metric: row.metric,
            model: row.model.clone(),
            location: row.location.clone(),
            horizon: row.horizon,
        })
        .or_default()
        .record(row.score);
    }

    let mut nested = StateMapWindow::new();
    for (key, aggregate) in flat {
        nested
            .entry(key.metric)
            .or_default()
            .entry(key.model)
            .or_default()
            .entry(key.location)
            .or_default()
            .insert(key.horizon, aggregate);
    }
    nested
}

/// Aggregates long-format coverage rows falling inside `window`, keyed for
/// the dashboard's interval-coverage chart.
pub fn coverage_for_window(window: &EvaluationWindow, coverage: &CoverageTable) -> CoverageWindow {
    let mut nested = CoverageWindow::new();
    for row in coverage.rows() {
        if !window.contains_score(row.reference_date, row.target_end_date) {
            continue;
        }
        nested
            .entry(row.model.clone())
            .or_default()
            .entry(row.horizon)
            .or_default()
            .entry(row.level)
            .or_default()
            .record(row.score);
    }
    nested
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hygeia_data::{CoverageRow, ScoreRow};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(start: NaiveDate, end: NaiveDate) -> EvaluationWindow {
        EvaluationWindow::new("w", start, end, true)
    }

    #[test]
    fn sum_count_records_and_merges() {
        let mut a = SumCount::default();
        a.record(2.0);
        a.record(4.0);
        assert_eq!(a.sum, 6.0);
        assert_eq!(a.count, 2);
        assert_eq!(a.mean(), Some(3.0));

        let mut b = SumCount::default();
        b.record(6.0);
        b.merge(a);
        assert_eq!(b.sum, 12.0);
        assert_eq!(b.count, 3);

        assert_eq!(SumCount::default().mean(), None);
    }

    #[test]
    fn sum_count_serializes_flat() {
        let mut agg = SumCount::default();
        agg.record(1.5);
        assert_eq!(
            serde_json::to_string(&agg).unwrap(),
            r#"{"sum":1.5,"count":1}"#
        );
    }

    #[test]
    fn state_map_groups_by_full_key() {
        let w = window(date(2024, 1, 6), date(2024, 2, 3));
        let scores = ScoreTable::new(vec![
            ScoreRow::new(Metric::Mape, "m".into(), "US".into(), date(2024, 1, 6), 0, 10.0),
            ScoreRow::new(Metric::Mape, "m".into(), "US".into(), date(2024, 1, 13), 0, 20.0),
            ScoreRow::new(Metric::Mape, "m".into(), "US".into(), date(2024, 1, 13), 1, 30.0),
            ScoreRow::new(Metric::Mape, "m".into(), "01".into(), date(2024, 1, 13), 0, 40.0),
        ]);

        let agg = state_map_for_window(&w, &scores);
        let us = &agg[&Metric::Mape]["m"]["US"];
        assert_eq!(us[&0], SumCount { sum: 30.0, count: 2 });
        assert_eq!(us[&1], SumCount { sum: 30.0, count: 1 });
        assert_eq!(agg[&Metric::Mape]["m"]["01"][&0].sum, 40.0);
    }

    #[test]
    fn scores_straddling_the_window_end_are_excluded() {
        // Reference inside the window, but the 3-week target lands past the
        // window end, so the whole score is excluded.
        let w = window(date(2024, 1, 6), date(2024, 7, 31));
        let inside = ScoreRow::new(
            Metric::WisBaseline,
            "m".into(),
            "US".into(),
            date(2024, 7, 13),
            1,
            1.0,
        );
        let straddling = ScoreRow::new(
            Metric::WisBaseline,
            "m".into(),
            "US".into(),
            date(2024, 7, 13),
            3,
            1.0,
        );
        let scores = ScoreTable::new(vec![inside, straddling]);

        let agg = state_map_for_window(&w, &scores);
        let horizons = &agg[&Metric::WisBaseline]["m"]["US"];
        assert!(horizons.contains_key(&1));
        assert!(!horizons.contains_key(&3));
    }

    #[test]
    fn coverage_groups_by_model_horizon_level() {
        let w = window(date(2024, 1, 6), date(2024, 2, 3));
        let coverage = CoverageTable::new(vec![
            CoverageRow::new("m".into(), "US".into(), date(2024, 1, 6), 0, 95, 100.0),
            CoverageRow::new("m".into(), "01".into(), date(2024, 1, 6), 0, 95, 0.0),
            CoverageRow::new("m".into(), "US".into(), date(2024, 1, 6), 0, 50, 100.0),
        ]);

        let agg = coverage_for_window(&w, &coverage);
        assert_eq!(agg["m"][&0][&95], SumCount { sum: 100.0, count: 2 });
        assert_eq!(agg["m"][&0][&50].count, 1);
    }

    #[test]
    fn empty_window_yields_empty_maps() {
        let w = window(date(2024, 1, 6), date(2024, 2, 3));
        assert!(state_map_for_window(&w, &ScoreTable::default()).is_empty());
        assert!(coverage_for_window(&w, &CoverageTable::default()).is_empty());
    }
}
