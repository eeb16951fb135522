//! Trailing dynamic evaluation periods.

use chrono::{Duration, NaiveDate};
use hygeia_data::next_sunday_on_or_after;

const DEFINITIONS: [(&str, &str, u8); 3] = [
    ("last-2-weeks", "Last 2 Weeks", 1),
    ("last-4-weeks", "Last 4 Weeks", 3),
    ("last-8-weeks", "Last 8 Weeks", 7),
];

/// A trailing window ending at the latest prediction reference date.
///
/// Periods feed evaluation aggregation only; timeline partitioning never
/// sees them. The display range snaps its start forward to a Sunday purely
/// for presentation — containment checks always use the true bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicPeriod {
    id: &'static str,
    display_name: &'static str,
    weeks_back: u8,
    start: NaiveDate,
    end: NaiveDate,
    index: usize,
}

impl DynamicPeriod {
    /// Stable identifier, e.g. `last-4-weeks`.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Selector text, e.g. `Last 4 Weeks`.
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    pub fn weeks_back(&self) -> u8 {
        self.weeks_back
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The cosmetic start shown in the selector: the first Sunday on or
    /// after the true start.
    pub fn display_start(&self) -> NaiveDate {
        next_sunday_on_or_after(self.start)
    }

    /// Parenthesized date range for the selector subtitle, e.g.
    /// `(Dec 01, 2024 - Jan 25, 2025)`.
    pub fn display_range(&self) -> String {
        format!(
            "({} - {})",
            self.display_start().format("%b %d, %Y"),
            self.end.format("%b %d, %Y")
        )
    }
}

/// Builds the three trailing periods anchored at `anchor` (the latest
/// prediction reference date). Returns an empty list when there are no
/// predictions to anchor to.
pub fn trailing_periods(anchor: Option<NaiveDate>) -> Vec<DynamicPeriod> {
    let Some(end) = anchor else {
        return Vec::new();
    };

    DEFINITIONS
        .iter()
        .enumerate()
        .map(|(index, &(id, display_name, weeks_back))| DynamicPeriod {
            id,
            display_name,
            weeks_back,
            start: end - Duration::weeks(i64::from(weeks_back)),
            end,
            index,
        })
        .collect()
}
