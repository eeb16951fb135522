//! Unaggregated score listings for the single-model view.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use hygeia_data::{Metric, ScoreTable};
use serde::Serialize;

use crate::window::EvaluationWindow;

/// One score as the single-model view plots it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub reference_date: NaiveDate,
    pub target_end_date: NaiveDate,
    pub score: f64,
}

/// window → metric → model → location → horizon → entries, chronological by
/// reference date.
pub type RawScores =
    BTreeMap<String, BTreeMap<Metric, BTreeMap<String, BTreeMap<String, BTreeMap<u8, Vec<ScoreEntry>>>>>>;

/// Collects per-score entries for every full-range window.
///
/// Dynamic periods are excluded (the single-model view only offers seasons),
/// and so is Coverage, which that view never plots.
pub fn raw_scores(windows: &[EvaluationWindow], scores: &ScoreTable) -> RawScores {
    let mut out = RawScores::new();
    for window in windows.iter().filter(|w| w.is_full_range()) {
        for row in scores.rows() {
            if row.metric.is_coverage()
                || !window.contains_score(row.reference_date, row.target_end_date)
            {
                continue;
            }
            // Table order is (metric, model, location, reference date), so
            // each leaf vector fills chronologically.
            out.entry(window.id().to_string())
                .or_default()
                .entry(row.metric)
                .or_default()
                .entry(row.model.clone())
                .or_default()
                .entry(row.location.clone())
                .or_default()
                .entry(row.horizon)
                .or_default()
                .push(ScoreEntry {
                    reference_date: row.reference_date,
                    target_end_date: row.target_end_date,
                    score: row.score,
                });
        }
    }
    out
}
