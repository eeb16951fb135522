//! Global date extent across input tables.

use chrono::NaiveDate;

use crate::error::DataError;
use crate::ground_truth::GroundTruthTable;
use crate::prediction::PredictionTable;

/// The inclusive `[earliest, latest]` span of all observed dates.
///
/// Drives ground-truth densification and the backward season walk, so it is
/// computed once over ground truth and predictions together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateExtent {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl DateExtent {
    /// # Errors
    ///
    /// Returns [`DataError::InvertedExtent`] when `earliest > latest`.
    pub fn new(earliest: NaiveDate, latest: NaiveDate) -> Result<Self, DataError> {
        if earliest > latest {
            return Err(DataError::InvertedExtent { earliest, latest });
        }
        Ok(Self { earliest, latest })
    }

    /// Computes the extent over ground-truth dates plus prediction reference
    /// and target dates.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::EmptyExtent`] when both tables are empty.
    pub fn from_tables(
        ground_truth: &GroundTruthTable,
        predictions: &PredictionTable,
    ) -> Result<Self, DataError> {
        let gt = ground_truth.date_extent();
        let preds = predictions.date_extent();

        let (earliest, latest) = match (gt, preds) {
            (Some((gt_min, gt_max)), Some((p_min, p_max))) => {
                (gt_min.min(p_min), gt_max.max(p_max))
            }
            (Some(bounds), None) | (None, Some(bounds)) => bounds,
            (None, None) => return Err(DataError::EmptyExtent),
        };

        Ok(Self { earliest, latest })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.earliest <= date && date <= self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ground_truth::{Admissions, GroundTruthRow};
    use crate::prediction::PredictionRow;
    use crate::quantiles::QuantileSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn gt_table(dates: &[NaiveDate]) -> GroundTruthTable {
        GroundTruthTable::from_rows(
            dates
                .iter()
                .map(|&d| GroundTruthRow {
                    date: d,
                    location: "US".to_string(),
                    admissions: Admissions::Reported(1.0),
                    weekly_rate: 0.1,
                })
                .collect(),
        )
    }

    fn pred_table(pairs: &[(NaiveDate, NaiveDate)]) -> PredictionTable {
        PredictionTable::new(
            pairs
                .iter()
                .map(|&(reference, target)| {
                    PredictionRow::new(
                        "m".to_string(),
                        "US".to_string(),
                        reference,
                        target,
                        QuantileSet::default(),
                    )
                    .unwrap()
                })
                .collect(),
        )
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        let result = DateExtent::new(date(2024, 2, 1), date(2024, 1, 1));
        assert!(matches!(result, Err(DataError::InvertedExtent { .. })));
    }

    #[test]
    fn from_tables_spans_both_sources() {
        let gt = gt_table(&[date(2023, 10, 7), date(2024, 1, 6)]);
        let preds = pred_table(&[(date(2024, 2, 3), date(2024, 2, 24))]);

        let extent = DateExtent::from_tables(&gt, &preds).unwrap();
        assert_eq!(extent.earliest, date(2023, 10, 7));
        assert_eq!(extent.latest, date(2024, 2, 24));
    }

    #[test]
    fn from_tables_prediction_target_extends_latest() {
        // Latest date comes from a target date, not a reference date.
        let gt = gt_table(&[date(2024, 1, 6)]);
        let preds = pred_table(&[(date(2024, 1, 6), date(2024, 1, 27))]);

        let extent = DateExtent::from_tables(&gt, &preds).unwrap();
        assert_eq!(extent.latest, date(2024, 1, 27));
    }

    #[test]
    fn from_tables_works_with_ground_truth_only() {
        let gt = gt_table(&[date(2023, 10, 7)]);
        let extent = DateExtent::from_tables(&gt, &PredictionTable::default()).unwrap();
        assert_eq!(extent.earliest, date(2023, 10, 7));
        assert_eq!(extent.latest, date(2023, 10, 7));
    }

    #[test]
    fn from_tables_empty_is_fatal() {
        let result = DateExtent::from_tables(&GroundTruthTable::default(), &PredictionTable::default());
        assert!(matches!(result, Err(DataError::EmptyExtent)));
    }

    #[test]
    fn contains_is_inclusive() {
        let extent = DateExtent::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(extent.contains(date(2024, 1, 1)));
        assert!(extent.contains(date(2024, 1, 31)));
        assert!(!extent.contains(date(2024, 2, 1)));
    }
}
