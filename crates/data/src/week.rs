//! Weekly calendar helpers.
//!
//! Surveillance data is reported on Saturday-anchored epidemiological weeks,
//! and period display labels snap to the following Sunday. Everything here
//! works on plain [`NaiveDate`]s; there is no time-of-day component anywhere
//! in the pipeline.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

fn days_until(target: Weekday, from: Weekday) -> i64 {
    ((target.num_days_from_monday() + 7 - from.num_days_from_monday()) % 7) as i64
}

/// The first Saturday on or after `date` (`date` itself when it is one).
pub fn next_saturday_on_or_after(date: NaiveDate) -> NaiveDate {
    date + Duration::days(days_until(Weekday::Sat, date.weekday()))
}

/// The first Sunday on or after `date` (`date` itself when it is one).
pub fn next_sunday_on_or_after(date: NaiveDate) -> NaiveDate {
    date + Duration::days(days_until(Weekday::Sun, date.weekday()))
}

/// Every Saturday in `[start, end]`, ascending. Empty when the range contains
/// no Saturday (including `start > end`).
pub fn saturdays(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let first = next_saturday_on_or_after(start);
    std::iter::successors(Some(first), |d| d.checked_add_signed(Duration::days(7)))
        .take_while(move |d| *d <= end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn saturday_is_its_own_anchor() {
        // 2024-01-06 is a Saturday
        assert_eq!(
            next_saturday_on_or_after(date(2024, 1, 6)),
            date(2024, 1, 6)
        );
    }

    #[test]
    fn sunday_rolls_forward_six_days_to_saturday() {
        // 2024-01-07 is a Sunday; next Saturday is 2024-01-13
        assert_eq!(
            next_saturday_on_or_after(date(2024, 1, 7)),
            date(2024, 1, 13)
        );
    }

    #[test]
    fn monday_snaps_to_next_sunday() {
        // 2024-01-08 is a Monday; next Sunday is 2024-01-14
        assert_eq!(next_sunday_on_or_after(date(2024, 1, 8)), date(2024, 1, 14));
    }

    #[test]
    fn sunday_is_its_own_sunday_anchor() {
        assert_eq!(next_sunday_on_or_after(date(2024, 1, 7)), date(2024, 1, 7));
    }

    #[test]
    fn saturdays_spanning_three_weeks() {
        let got: Vec<NaiveDate> = saturdays(date(2024, 1, 1), date(2024, 1, 21)).collect();
        assert_eq!(
            got,
            vec![date(2024, 1, 6), date(2024, 1, 13), date(2024, 1, 20)]
        );
    }

    #[test]
    fn saturdays_inclusive_of_both_endpoints() {
        let got: Vec<NaiveDate> = saturdays(date(2024, 1, 6), date(2024, 1, 13)).collect();
        assert_eq!(got, vec![date(2024, 1, 6), date(2024, 1, 13)]);
    }

    #[test]
    fn saturdays_empty_when_range_has_none() {
        // Sunday through Friday of the same week
        let got: Vec<NaiveDate> = saturdays(date(2024, 1, 7), date(2024, 1, 12)).collect();
        assert!(got.is_empty());
    }

    #[test]
    fn saturdays_empty_for_inverted_range() {
        let got: Vec<NaiveDate> = saturdays(date(2024, 2, 1), date(2024, 1, 1)).collect();
        assert!(got.is_empty());
    }
}
