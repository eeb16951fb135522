//! Statistical helper functions for the Hygeia aggregation pipeline.

use serde::Serialize;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Linear-interpolation quantile (numpy's default `percentile` method,
/// equivalently R's type=7): `h = (n - 1) * p`, interpolated between the
/// two nearest order statistics.
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_linear(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_linear: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Median of pre-sorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn median(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "median: input must not be empty");
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Five-number percentile summary of a score sample, plus the moments the
/// dashboard's box plots read alongside it.
///
/// `scores` holds the retained sample in the order it was supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxplotStats {
    pub q05: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub q95: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
    pub scores: Vec<f64>,
}

/// Summarizes a sample into [`BoxplotStats`].
///
/// NaN entries are dropped before any statistic is computed. Returns `None`
/// when nothing remains, so callers can skip empty cells instead of emitting
/// NaN-filled summaries.
pub fn boxplot_stats(values: &[f64]) -> Option<BoxplotStats> {
    let kept: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if kept.is_empty() {
        return None;
    }

    let mut sorted = kept.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Some(BoxplotStats {
        q05: quantile_linear(&sorted, 0.05),
        q25: quantile_linear(&sorted, 0.25),
        median: quantile_linear(&sorted, 0.5),
        q75: quantile_linear(&sorted, 0.75),
        q95: quantile_linear(&sorted, 0.95),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean: mean(&kept),
        count: kept.len(),
        scores: kept,
    })
}
