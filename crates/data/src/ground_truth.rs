//! Ground-truth hospital-admission observations.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::extent::DateExtent;
use crate::week::saturdays;

/// An admissions count that may be missing.
///
/// The persisted dashboard contract encodes missing slots as `-1` (with a
/// zero weekly rate); internally the distinction is kept explicit so missing
/// values can never leak into statistics as real numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admissions {
    Missing,
    Reported(f64),
}

impl Admissions {
    /// Classifies a raw CSV value: non-negative counts are reported, anything
    /// else (negative sentinels) is missing.
    pub fn from_raw(value: f64) -> Self {
        if value >= 0.0 {
            Admissions::Reported(value)
        } else {
            Admissions::Missing
        }
    }

    pub fn reported(self) -> Option<f64> {
        match self {
            Admissions::Reported(v) => Some(v),
            Admissions::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Admissions::Missing)
    }

    /// The out-of-band encoding used at the serialization boundary.
    pub fn sentinel_value(self) -> f64 {
        match self {
            Admissions::Reported(v) => v,
            Admissions::Missing => -1.0,
        }
    }
}

/// One (date, location) observation.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruthRow {
    pub date: NaiveDate,
    pub location: String,
    pub admissions: Admissions,
    pub weekly_rate: f64,
}

/// The value half of a ground-truth cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundTruthValue {
    pub admissions: Admissions,
    pub weekly_rate: f64,
}

impl GroundTruthValue {
    /// The serializable form, present only for reported observations.
    pub fn reported(&self) -> Option<ReportedAdmissions> {
        self.admissions.reported().map(|admissions| ReportedAdmissions {
            admissions,
            weekly_rate: self.weekly_rate,
        })
    }
}

/// A reported observation in the shape the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedAdmissions {
    pub admissions: f64,
    pub weekly_rate: f64,
}

/// All ground-truth observations, indexed by date then location.
#[derive(Debug, Clone, Default)]
pub struct GroundTruthTable {
    by_date: BTreeMap<NaiveDate, BTreeMap<String, GroundTruthValue>>,
}

impl GroundTruthTable {
    pub fn from_rows(rows: Vec<GroundTruthRow>) -> Self {
        let mut table = Self::default();
        for row in rows {
            table.insert(row);
        }
        table
    }

    /// Inserts one observation; a duplicate (date, location) key overwrites.
    pub fn insert(&mut self, row: GroundTruthRow) {
        self.by_date.entry(row.date).or_default().insert(
            row.location,
            GroundTruthValue {
                admissions: row.admissions,
                weekly_rate: row.weekly_rate,
            },
        );
    }

    /// Densifies the table to a complete Saturday × location grid over
    /// `extent`, filling absent slots with missing-value placeholders so the
    /// calendar axis has no holes. Returns the number of slots added.
    pub fn densify(&mut self, extent: DateExtent, locations: &[String]) -> usize {
        let mut added = 0;
        for saturday in saturdays(extent.earliest, extent.latest) {
            let per_location = self.by_date.entry(saturday).or_default();
            for location in locations {
                if !per_location.contains_key(location) {
                    per_location.insert(
                        location.clone(),
                        GroundTruthValue {
                            admissions: Admissions::Missing,
                            weekly_rate: 0.0,
                        },
                    );
                    added += 1;
                }
            }
        }
        added
    }

    pub fn get(&self, date: NaiveDate, location: &str) -> Option<&GroundTruthValue> {
        self.by_date.get(&date)?.get(location)
    }

    /// All distinct dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = *self.by_date.keys().next()?;
        let last = *self.by_date.keys().next_back()?;
        Some((first, last))
    }

    /// Total number of (date, location) cells.
    pub fn len(&self) -> usize {
        self.by_date.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
