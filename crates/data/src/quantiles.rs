//! Canonical prediction quantile levels.

/// The seven quantile levels retained from forecast submissions.
///
/// Submission files carry many more levels; everything outside this set is
/// dropped at ingestion. Names are the percentage points (2.5% .. 97.5%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuantileLevel {
    Q2_5,
    Q5,
    Q25,
    Q50,
    Q75,
    Q95,
    Q97_5,
}

impl QuantileLevel {
    /// All levels in ascending order.
    pub const ALL: [QuantileLevel; 7] = [
        QuantileLevel::Q2_5,
        QuantileLevel::Q5,
        QuantileLevel::Q25,
        QuantileLevel::Q50,
        QuantileLevel::Q75,
        QuantileLevel::Q95,
        QuantileLevel::Q97_5,
    ];

    /// The level as a probability in `[0, 1]`.
    pub fn probability(self) -> f64 {
        match self {
            QuantileLevel::Q2_5 => 0.025,
            QuantileLevel::Q5 => 0.05,
            QuantileLevel::Q25 => 0.25,
            QuantileLevel::Q50 => 0.5,
            QuantileLevel::Q75 => 0.75,
            QuantileLevel::Q95 => 0.95,
            QuantileLevel::Q97_5 => 0.975,
        }
    }

    /// Matches a numeric probability against the canonical levels.
    pub fn from_probability(p: f64) -> Option<QuantileLevel> {
        QuantileLevel::ALL
            .iter()
            .copied()
            .find(|level| (level.probability() - p).abs() < 1e-9)
    }

    /// Parses vendor output-type identifiers such as `"0.5"`, `"0.050"`, or
    /// `"0.975"`. Non-numeric identifiers (rate-change categories and the
    /// like) yield `None`.
    pub fn from_label(label: &str) -> Option<QuantileLevel> {
        label
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(QuantileLevel::from_probability)
    }
}

/// Per-row storage for the canonical quantile values.
///
/// A pivoted prediction row may be missing individual levels (sparse archive
/// submissions); absent levels read back as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuantileSet {
    values: [Option<f64>; QuantileLevel::ALL.len()],
}

impl QuantileSet {
    pub fn set(&mut self, level: QuantileLevel, value: f64) {
        self.values[level as usize] = Some(value);
    }

    pub fn get(&self, level: QuantileLevel) -> Option<f64> {
        self.values[level as usize]
    }

    /// The stored value, or 0.0 when the level is absent. This is the default
    /// the dashboard chart contract expects for sparse submissions.
    pub fn get_or_zero(&self, level: QuantileLevel) -> f64 {
        self.get(level).unwrap_or(0.0)
    }

    /// True when no level has been set.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}
