//! Error types for hygeia-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the hygeia-io crate.
///
/// This enum covers missing input files, CSV parsing failures, structural
/// problems such as absent columns or submission trees with no usable rows,
/// and failures while writing the dashboard documents.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a filesystem error raised while reading inputs.
    #[error("read error for {}: {reason}", path.display())]
    Read {
        /// File or directory being read.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the CSV parser.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// File being parsed.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a required column is not present in an input file.
    #[error("column '{column}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        column: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when the submission directories yield no prediction rows.
    #[error("no usable prediction rows found under {}", path.display())]
    NoPredictions {
        /// Data root that was scanned.
        path: PathBuf,
    },

    /// Wraps a filesystem or serialization error raised while writing output.
    #[error("write error for {}: {reason}", path.display())]
    Write {
        /// Output path being written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/data/locations.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /data/locations.csv");
    }

    #[test]
    fn display_read() {
        let err = IoError::Read {
            path: PathBuf::from("/data/unprocessed"),
            reason: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "read error for /data/unprocessed: permission denied"
        );
    }

    #[test]
    fn display_csv() {
        let err = IoError::Csv {
            path: PathBuf::from("/data/MAPE.csv"),
            reason: "invalid record".to_string(),
        };
        assert_eq!(err.to_string(), "csv error in /data/MAPE.csv: invalid record");
    }

    #[test]
    fn display_missing_column() {
        let err = IoError::MissingColumn {
            column: "weekly_rate".to_string(),
            path: PathBuf::from("/data/gt.csv"),
        };
        assert_eq!(
            err.to_string(),
            "column 'weekly_rate' not found in /data/gt.csv"
        );
    }

    #[test]
    fn display_no_predictions() {
        let err = IoError::NoPredictions {
            path: PathBuf::from("/data"),
        };
        assert_eq!(err.to_string(), "no usable prediction rows found under /data");
    }

    #[test]
    fn display_write() {
        let err = IoError::Write {
            path: PathBuf::from("/data/app_data_core.json"),
            reason: "disk full".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "write error for /data/app_data_core.json: disk full"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
