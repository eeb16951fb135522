//! Normalized quantile-prediction rows.

use chrono::NaiveDate;

use crate::quantiles::QuantileSet;

/// The forecast horizons the dashboard displays, in weeks ahead.
pub const VALID_HORIZONS: std::ops::RangeInclusive<i64> = 0..=3;

/// One pivoted prediction: a single (model, location, reference date, target
/// date) cell with its canonical quantile values.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub model: String,
    pub location: String,
    pub reference_date: NaiveDate,
    pub target_end_date: NaiveDate,
    /// Weeks between reference and target date, always in `0..=3`.
    pub horizon: u8,
    pub quantiles: QuantileSet,
}

impl PredictionRow {
    /// Builds a row, deriving the horizon from the date pair.
    ///
    /// Returns `None` when the target precedes the reference date or the
    /// derived horizon falls outside `0..=3`; such rows are dropped at
    /// ingestion rather than carried as errors. Horizons are derived by
    /// truncating division, so ragged submissions a few days off a whole
    /// week still land in the nearest-lower horizon.
    pub fn new(
        model: String,
        location: String,
        reference_date: NaiveDate,
        target_end_date: NaiveDate,
        quantiles: QuantileSet,
    ) -> Option<Self> {
        let days = target_end_date.signed_duration_since(reference_date).num_days();
        if days < 0 {
            return None;
        }
        let horizon = days / 7;
        if !VALID_HORIZONS.contains(&horizon) {
            return None;
        }
        Some(Self {
            model,
            location,
            reference_date,
            target_end_date,
            horizon: horizon as u8,
            quantiles,
        })
    }
}

/// All prediction rows for a pipeline run, sorted for indexed access.
///
/// Rows are ordered by (model, reference date, location, target date) so a
/// model's rows form one contiguous slice.
#[derive(Debug, Clone, Default)]
pub struct PredictionTable {
    rows: Vec<PredictionRow>,
}

impl PredictionTable {
    pub fn new(mut rows: Vec<PredictionRow>) -> Self {
        rows.sort_by(|a, b| {
            (&a.model, a.reference_date, &a.location, a.target_end_date).cmp(&(
                &b.model,
                b.reference_date,
                &b.location,
                b.target_end_date,
            ))
        });
        Self { rows }
    }

    pub fn rows(&self) -> &[PredictionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The contiguous slice of rows belonging to `model` (possibly empty).
    pub fn for_model(&self, model: &str) -> &[PredictionRow] {
        let lo = self.rows.partition_point(|r| r.model.as_str() < model);
        let hi = self.rows.partition_point(|r| r.model.as_str() <= model);
        &self.rows[lo..hi]
    }

    /// The most recent reference date across all models, if any rows exist.
    /// Dynamic evaluation periods anchor to this date.
    pub fn latest_reference_date(&self) -> Option<NaiveDate> {
        self.rows.iter().map(|r| r.reference_date).max()
    }

    /// Minimum and maximum dates across both reference and target dates.
    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|r| r.reference_date).min()?;
        let max = self.rows.iter().map(|r| r.target_end_date).max()?;
        // Target dates never precede their reference date, so min reference
        // and max target bound the full set.
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantiles::{QuantileLevel, QuantileSet};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(model: &str, location: &str, reference: NaiveDate, target: NaiveDate) -> PredictionRow {
        PredictionRow::new(
            model.to_string(),
            location.to_string(),
            reference,
            target,
            QuantileSet::default(),
        )
        .unwrap()
    }

    #[test]
    fn horizon_derived_from_week_offset() {
        let reference = date(2024, 1, 6);
        for (weeks, expected) in [(0_i64, 0_u8), (1, 1), (2, 2), (3, 3)] {
            let target = reference + chrono::Duration::weeks(weeks);
            let r = row("m", "US", reference, target);
            assert_eq!(r.horizon, expected);
        }
    }

    #[test]
    fn horizon_truncates_partial_weeks() {
        // 10 days ahead is still horizon 1
        let r = row("m", "US", date(2024, 1, 6), date(2024, 1, 16));
        assert_eq!(r.horizon, 1);
    }

    #[test]
    fn rows_beyond_three_weeks_are_dropped() {
        let reference = date(2024, 1, 6);
        let target = reference + chrono::Duration::weeks(4);
        assert!(
            PredictionRow::new(
                "m".into(),
                "US".into(),
                reference,
                target,
                QuantileSet::default()
            )
            .is_none()
        );
    }

    #[test]
    fn rows_with_target_before_reference_are_dropped() {
        assert!(
            PredictionRow::new(
                "m".into(),
                "US".into(),
                date(2024, 1, 6),
                date(2024, 1, 5),
                QuantileSet::default()
            )
            .is_none()
        );
    }

    #[test]
    fn for_model_returns_contiguous_slice() {
        let table = PredictionTable::new(vec![
            row("b", "US", date(2024, 1, 6), date(2024, 1, 6)),
            row("a", "US", date(2024, 1, 6), date(2024, 1, 13)),
            row("b", "01", date(2024, 1, 13), date(2024, 1, 13)),
        ]);

        assert_eq!(table.for_model("a").len(), 1);
        assert_eq!(table.for_model("b").len(), 2);
        assert!(table.for_model("missing").is_empty());
    }

    #[test]
    fn latest_reference_date_across_models() {
        let table = PredictionTable::new(vec![
            row("a", "US", date(2024, 1, 6), date(2024, 1, 6)),
            row("b", "US", date(2024, 2, 3), date(2024, 2, 10)),
        ]);
        assert_eq!(table.latest_reference_date(), Some(date(2024, 2, 3)));
        assert_eq!(PredictionTable::default().latest_reference_date(), None);
    }

    #[test]
    fn date_extent_spans_reference_and_target() {
        let table = PredictionTable::new(vec![
            row("a", "US", date(2024, 1, 6), date(2024, 1, 27)),
            row("a", "US", date(2024, 1, 13), date(2024, 1, 13)),
        ]);
        assert_eq!(
            table.date_extent(),
            Some((date(2024, 1, 6), date(2024, 1, 27)))
        );
    }

    #[test]
    fn quantiles_survive_construction() {
        let mut quantiles = QuantileSet::default();
        quantiles.set(QuantileLevel::Q50, 42.0);
        let r = PredictionRow::new(
            "m".into(),
            "US".into(),
            date(2024, 1, 6),
            date(2024, 1, 6),
            quantiles,
        )
        .unwrap();
        assert_eq!(r.quantiles.get(QuantileLevel::Q50), Some(42.0));
    }
}
