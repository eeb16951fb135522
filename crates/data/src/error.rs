//! Data-table error types.

use chrono::NaiveDate;

/// Errors raised while deriving facts from the normalized tables.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Neither ground truth nor predictions contain a single date.
    #[error("cannot derive a date extent: no ground-truth or prediction dates available")]
    EmptyExtent,

    /// An extent was requested with its bounds out of order.
    #[error("inverted date extent: earliest {earliest} is after latest {latest}")]
    InvertedExtent {
        earliest: NaiveDate,
        latest: NaiveDate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_extent_display() {
        let err = DataError::EmptyExtent;
        let msg = format!("{}", err);
        assert!(msg.contains("no ground-truth or prediction dates"));
    }

    #[test]
    fn test_inverted_extent_display() {
        let err = DataError::InvertedExtent {
            earliest: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            latest: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("2024-05-01"));
        assert!(msg.contains("2023-05-01"));
    }
}
