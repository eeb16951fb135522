//! Normalized evaluation-score rows.

use chrono::{Duration, NaiveDate};

use crate::metric::Metric;

/// Nominal prediction-interval coverage levels present in the coverage file,
/// in percent.
pub const COVERAGE_LEVELS: [u8; 11] = [10, 20, 30, 40, 50, 60, 70, 80, 90, 95, 98];

/// One evaluation score for a (metric, model, location, reference date,
/// horizon) key.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub metric: Metric,
    pub model: String,
    pub location: String,
    pub reference_date: NaiveDate,
    /// Always `reference_date + horizon` weeks; window containment checks
    /// both ends.
    pub target_end_date: NaiveDate,
    pub horizon: u8,
    pub score: f64,
}

impl ScoreRow {
    pub fn new(
        metric: Metric,
        model: String,
        location: String,
        reference_date: NaiveDate,
        horizon: u8,
        score: f64,
    ) -> Self {
        Self {
            metric,
            model,
            location,
            reference_date,
            target_end_date: reference_date + Duration::weeks(i64::from(horizon)),
            horizon,
            score,
        }
    }
}

/// All standard-metric score rows (WIS/Baseline, MAPE, and the 95% coverage
/// column recast as the Coverage metric), sorted for deterministic
/// aggregation order.
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    rows: Vec<ScoreRow>,
}

impl ScoreTable {
    pub fn new(mut rows: Vec<ScoreRow>) -> Self {
        rows.sort_by(|a, b| {
            (a.metric, &a.model, &a.location, a.reference_date, a.horizon).cmp(&(
                b.metric,
                &b.model,
                &b.location,
                b.reference_date,
                b.horizon,
            ))
        });
        Self { rows }
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One long-format coverage observation: the empirical coverage of a single
/// nominal interval level.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageRow {
    pub model: String,
    pub location: String,
    pub reference_date: NaiveDate,
    pub target_end_date: NaiveDate,
    pub horizon: u8,
    /// Nominal level in percent, one of [`COVERAGE_LEVELS`].
    pub level: u8,
    pub score: f64,
}

impl CoverageRow {
    pub fn new(
        model: String,
        location: String,
        reference_date: NaiveDate,
        horizon: u8,
        level: u8,
        score: f64,
    ) -> Self {
        Self {
            model,
            location,
            reference_date,
            target_end_date: reference_date + Duration::weeks(i64::from(horizon)),
            horizon,
            level,
            score,
        }
    }
}

/// All long-format coverage rows.
#[derive(Debug, Clone, Default)]
pub struct CoverageTable {
    rows: Vec<CoverageRow>,
}

impl CoverageTable {
    pub fn new(mut rows: Vec<CoverageRow>) -> Self {
        rows.sort_by(|a, b| {
            (&a.model, a.horizon, a.level, a.reference_date, &a.location).cmp(&(
                &b.model,
                b.horizon,
                b.level,
                b.reference_date,
                &b.location,
            ))
        });
        Self { rows }
    }

    pub fn rows(&self) -> &[CoverageRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn score_row_derives_target_end_date() {
        let row = ScoreRow::new(
            Metric::Mape,
            "m".to_string(),
            "US".to_string(),
            date(2024, 1, 6),
            3,
            12.5,
        );
        assert_eq!(row.target_end_date, date(2024, 1, 27));
    }

    #[test]
    fn horizon_zero_target_equals_reference() {
        let row = ScoreRow::new(
            Metric::WisBaseline,
            "m".to_string(),
            "US".to_string(),
            date(2024, 1, 6),
            0,
            0.8,
        );
        assert_eq!(row.target_end_date, row.reference_date);
    }

    #[test]
    fn coverage_row_derives_target_end_date() {
        let row = CoverageRow::new(
            "m".to_string(),
            "US".to_string(),
            date(2024, 1, 6),
            2,
            95,
            100.0,
        );
        assert_eq!(row.target_end_date, date(2024, 1, 20));
        assert_eq!(row.level, 95);
    }

    #[test]
    fn score_table_sorts_rows() {
        let table = ScoreTable::new(vec![
            ScoreRow::new(
                Metric::Mape,
                "b".to_string(),
                "US".to_string(),
                date(2024, 1, 6),
                0,
                1.0,
            ),
            ScoreRow::new(
                Metric::WisBaseline,
                "a".to_string(),
                "US".to_string(),
                date(2024, 1, 6),
                0,
                2.0,
            ),
        ]);
        assert_eq!(table.rows()[0].metric, Metric::WisBaseline);
        assert_eq!(table.rows()[1].metric, Metric::Mape);
    }
}
