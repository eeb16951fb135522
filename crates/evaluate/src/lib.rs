//! Windowed aggregation of forecast evaluation scores.
//!
//! Score files arrive as one row per (metric, model, location, reference
//! date, horizon). The dashboard never filters those client-side; instead
//! every aggregate it can display is precomputed here per evaluation window:
//! mergeable sum/count buckets for the state map, nominal-level buckets for
//! the interval-coverage chart, per-location boxplot spreads for every
//! horizon combination, and chronological raw listings for the single-model
//! view.

use std::collections::BTreeMap;

use hygeia_data::{CoverageTable, ScoreTable};
use hygeia_seasons::{DynamicPeriod, Season};
use tracing::debug;

mod aggregate;
mod iqr;
mod raw;
mod window;

pub use aggregate::{
    CoverageWindow, StateMapWindow, SumCount, coverage_for_window, state_map_for_window,
};
pub use iqr::{WindowIqr, horizon_subsets, window_iqr};
pub use raw::{RawScores, ScoreEntry, raw_scores};
pub use window::{EvaluationWindow, evaluation_windows};

/// All precomputed evaluation views, keyed by window id. Windows with no
/// scores contribute no keys.
#[derive(Debug, Clone, Default)]
pub struct EvaluationSummary {
    pub iqr: BTreeMap<String, WindowIqr>,
    pub state_map: BTreeMap<String, StateMapWindow>,
    pub coverage: BTreeMap<String, CoverageWindow>,
    pub raw_scores: RawScores,
}

/// Aggregates scores over every season and dynamic period.
pub fn evaluate(
    seasons: &[Season],
    periods: &[DynamicPeriod],
    scores: &ScoreTable,
    coverage: &CoverageTable,
) -> EvaluationSummary {
    let windows = evaluation_windows(seasons, periods);

    let mut summary = EvaluationSummary::default();
    for window in &windows {
        let state_map = state_map_for_window(window, scores);
        let coverage_map = coverage_for_window(window, coverage);
        debug!(
            window = window.id(),
            start = %window.start(),
            end = %window.end(),
            metrics = state_map.len(),
            coverage_models = coverage_map.len(),
            "aggregated evaluation window"
        );

        if !state_map.is_empty() {
            let iqr = window_iqr(&state_map);
            if !iqr.is_empty() {
                summary.iqr.insert(window.id().to_string(), iqr);
            }
            summary.state_map.insert(window.id().to_string(), state_map);
        }
        if !coverage_map.is_empty() {
            summary.coverage.insert(window.id().to_string(), coverage_map);
        }
    }

    summary.raw_scores = raw_scores(&windows, scores);
    summary
}
