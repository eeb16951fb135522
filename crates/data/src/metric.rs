//! Evaluation metric identifiers.

use std::fmt;

/// The three evaluation metrics carried through aggregation.
///
/// Serializes to the exact metric strings the dashboard keys its evaluation
/// structures by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    /// WIS score divided by the baseline model's WIS (used raw, no scaling).
    WisBaseline,
    /// Mean absolute percentage error, scaled to percent at ingestion.
    Mape,
    /// 95% prediction-interval coverage, scaled to percent at ingestion.
    Coverage,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::WisBaseline, Metric::Mape, Metric::Coverage];

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::WisBaseline => "WIS/Baseline",
            Metric::Mape => "MAPE",
            Metric::Coverage => "Coverage",
        }
    }

    /// Coverage is excluded from percentile (IQR) and raw-score views.
    pub fn is_coverage(self) -> bool {
        matches!(self, Metric::Coverage)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Metric {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
