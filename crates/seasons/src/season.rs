//! Academic-year season windows.

use chrono::{Datelike, NaiveDate};
use hygeia_data::DateExtent;

/// One academic flu season.
///
/// Construction establishes the invariants: the window spans Aug 1 through
/// Jul 31 except that the oldest season's start is clamped up to the true
/// earliest observed date (flagged `is_partial`), and exactly one generated
/// season carries `is_ongoing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    id: String,
    start: NaiveDate,
    end: NaiveDate,
    start_year: i32,
    index: usize,
    is_ongoing: bool,
    is_partial: bool,
}

impl Season {
    /// Stable identifier of the form `season-2023-2024`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// First day of the window (clamped for partial seasons).
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window, always a Jul 31.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Chronological position, 0 = oldest.
    pub fn index(&self) -> usize {
        self.index
    }

    /// True for the season containing the latest observed date.
    pub fn is_ongoing(&self) -> bool {
        self.is_ongoing
    }

    /// True when data starts after the nominal Aug 1 boundary.
    pub fn is_partial(&self) -> bool {
        self.is_partial
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Human-readable label, e.g. `2023-2024 (Ongoing)` or `Partial 2021-2022`.
    /// An ongoing partial season reads as ongoing.
    pub fn display_label(&self) -> String {
        let years = format!("{}-{}", self.start_year, self.start_year + 1);
        if self.is_ongoing {
            format!("{years} (Ongoing)")
        } else if self.is_partial {
            format!("Partial {years}")
        } else {
            years
        }
    }

    /// The `start/end` ISO pair used as the dashboard's season selector value.
    pub fn time_value(&self) -> String {
        format!(
            "{}/{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

// Aug 1 and Jul 31 exist in every year chrono can represent.
fn aug_1(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 8, 1).expect("Aug 1 is always a valid date")
}

fn jul_31(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 7, 31).expect("Jul 31 is always a valid date")
}

/// Generates the full list of seasons covering `extent`, oldest first.
///
/// Walks backward one academic year at a time from the season containing
/// `extent.latest` until the season end precedes `extent.earliest`, then
/// reverses and re-indexes chronologically. Always yields at least one
/// season.
pub fn generate_seasons(extent: DateExtent) -> Vec<Season> {
    let mut year = extent.latest.year();
    if extent.latest.month() > 7 {
        // Past July means the next academic year has already started.
        year += 1;
    }

    let mut seasons = Vec::new();
    let mut end = jul_31(year);
    while end >= extent.earliest {
        let nominal_start = aug_1(year - 1);
        let is_partial = nominal_start < extent.earliest;
        let start = if is_partial {
            extent.earliest
        } else {
            nominal_start
        };

        seasons.push(Season {
            id: format!("season-{}-{}", year - 1, year),
            start,
            end,
            start_year: year - 1,
            index: 0,
            is_ongoing: extent.latest <= end,
            is_partial,
        });

        year -= 1;
        end = jul_31(year);
    }

    seasons.reverse();
    for (index, season) in seasons.iter_mut().enumerate() {
        season.index = index;
    }
    seasons
}
