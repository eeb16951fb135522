//! Evaluation windows: the date ranges scores are aggregated over.

use chrono::NaiveDate;
use hygeia_seasons::{DynamicPeriod, Season};

/// One aggregation window: either a full-range season or a trailing dynamic
/// period, reduced to the id and date range the aggregator needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationWindow {
    id: String,
    start: NaiveDate,
    end: NaiveDate,
    full_range: bool,
}

impl EvaluationWindow {
    pub fn new(id: impl Into<String>, start: NaiveDate, end: NaiveDate, full_range: bool) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            full_range,
        }
    }

    pub fn from_season(season: &Season) -> Self {
        Self::new(season.id(), season.start(), season.end(), true)
    }

    pub fn from_period(period: &DynamicPeriod) -> Self {
        Self::new(period.id(), period.start(), period.end(), false)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Raw-score listings are kept for full-range seasons only.
    pub fn is_full_range(&self) -> bool {
        self.full_range
    }

    /// A score belongs to a window only when its whole forecast lies inside:
    /// the reference date on or after the window start AND the target date on
    /// or before the window end. Filtering on the reference date alone would
    /// let late-season forecasts leak scores into the following window.
    pub fn contains_score(&self, reference_date: NaiveDate, target_end_date: NaiveDate) -> bool {
        self.start <= reference_date && target_end_date <= self.end
    }
}

/// All aggregation windows for one run: every season plus every dynamic
/// period.
pub fn evaluation_windows(seasons: &[Season], periods: &[DynamicPeriod]) -> Vec<EvaluationWindow> {
    seasons
        .iter()
        .map(EvaluationWindow::from_season)
        .chain(periods.iter().map(EvaluationWindow::from_period))
        .collect()
}
