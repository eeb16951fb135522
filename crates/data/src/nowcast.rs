//! Same-week rate-change (nowcast) trend probabilities.

use chrono::NaiveDate;
use serde::Serialize;

/// Probabilities for the three rate-change outcomes of one nowcast.
///
/// Serialized exactly as the dashboard's nowcast map expects. Absent
/// outcomes stay at 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NowcastTrend {
    pub decrease: f64,
    pub increase: f64,
    pub stable: f64,
}

/// One nowcast: a rate-change prediction whose target week equals its
/// reference week.
#[derive(Debug, Clone, PartialEq)]
pub struct NowcastRow {
    pub model: String,
    pub location: String,
    pub reference_date: NaiveDate,
    pub trend: NowcastTrend,
}
