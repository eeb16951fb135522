//! Partition kinds and boundary computation.

use std::fmt;

use chrono::{Duration, NaiveDate};
use hygeia_data::PredictionRow;
use hygeia_seasons::Season;

/// The four causal sub-ranges of a season relative to one model's
/// forecasting activity, in timeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartitionKind {
    /// Before the model's first reference date.
    PreForecast,
    /// From first through last reference date.
    FullForecast,
    /// After the last reference date, while targets still land.
    ForecastTail,
    /// After the last target date.
    PostForecast,
}

impl PartitionKind {
    pub const ALL: [PartitionKind; 4] = [
        PartitionKind::PreForecast,
        PartitionKind::FullForecast,
        PartitionKind::ForecastTail,
        PartitionKind::PostForecast,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PartitionKind::PreForecast => "pre-forecast",
            PartitionKind::FullForecast => "full-forecast",
            PartitionKind::ForecastTail => "forecast-tail",
            PartitionKind::PostForecast => "post-forecast",
        }
    }
}

impl fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for PartitionKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// An inclusive date range that may be degenerate (`start > end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Degenerate ranges arise routinely from sentinel boundaries and are
    /// skipped rather than treated as errors.
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A model's forecasting anchor dates within one season.
///
/// When the model has no predictions in the season, the anchors collapse to
/// sentinels (`first_reference = season.end`, the other two = season.start)
/// and `has_predictions` reports false so callers skip partitioning outright
/// instead of building grids from sentinel arithmetic.
///
/// Because ingestion drops rows whose target precedes their reference date,
/// `last_target >= last_reference` holds whenever predictions exist, and the
/// four derived ranges tile the season without overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastBoundaries {
    pub first_reference: NaiveDate,
    pub last_reference: NaiveDate,
    pub last_target: NaiveDate,
    empty: bool,
}

impl ForecastBoundaries {
    /// Computes boundaries over `rows`, which the caller has already
    /// restricted to reference dates inside `season`.
    pub fn from_rows<'a, I>(rows: I, season: &Season) -> Self
    where
        I: IntoIterator<Item = &'a PredictionRow>,
    {
        let mut first_reference: Option<NaiveDate> = None;
        let mut last_reference: Option<NaiveDate> = None;
        let mut last_target: Option<NaiveDate> = None;

        for row in rows {
            first_reference = Some(match first_reference {
                Some(d) => d.min(row.reference_date),
                None => row.reference_date,
            });
            last_reference = Some(match last_reference {
                Some(d) => d.max(row.reference_date),
                None => row.reference_date,
            });
            last_target = Some(match last_target {
                Some(d) => d.max(row.target_end_date),
                None => row.target_end_date,
            });
        }

        Self {
            empty: first_reference.is_none(),
            first_reference: first_reference.unwrap_or_else(|| season.end()),
            last_reference: last_reference.unwrap_or_else(|| season.start()),
            last_target: last_target.unwrap_or_else(|| season.start()),
        }
    }

    /// False when the anchors are empty-season sentinels.
    pub fn has_predictions(&self) -> bool {
        !self.empty
    }

    /// The four partition ranges in timeline order. Ranges may be
    /// degenerate; callers skip those.
    pub fn partition_ranges(&self, season: &Season) -> [(PartitionKind, DateRange); 4] {
        let day = Duration::days(1);
        [
            (
                PartitionKind::PreForecast,
                DateRange {
                    start: season.start(),
                    end: self.first_reference - day,
                },
            ),
            (
                PartitionKind::FullForecast,
                DateRange {
                    start: self.first_reference,
                    end: self.last_reference,
                },
            ),
            (
                PartitionKind::ForecastTail,
                DateRange {
                    start: self.last_reference + day,
                    end: self.last_target,
                },
            ),
            (
                PartitionKind::PostForecast,
                DateRange {
                    start: self.last_target + day,
                    end: season.end(),
                },
            ),
        ]
    }
}
