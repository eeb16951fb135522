//! Shared CSV reader plumbing.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::IoError;

/// Opens a CSV file for header-aware record reading.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] when the file does not exist and
/// [`IoError::Read`] when it cannot be opened.
pub(crate) fn open_csv(path: &Path) -> Result<csv::Reader<File>, IoError> {
    if !path.is_file() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| IoError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(csv::Reader::from_reader(file))
}

/// The first name in `required` that the header row lacks, if any.
pub(crate) fn missing_column(headers: &csv::StringRecord, required: &[&str]) -> Option<String> {
    required
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
        .map(|column| column.to_string())
}

/// Validates that every column in `required` is present.
///
/// # Errors
///
/// Returns [`IoError::MissingColumn`] naming the first absent column, or
/// [`IoError::Csv`] when the header row itself cannot be read.
pub(crate) fn require_columns<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    path: &Path,
    required: &[&str],
) -> Result<(), IoError> {
    let headers = reader.headers().map_err(|e| IoError::Csv {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    match missing_column(headers, required) {
        Some(column) => Err(IoError::MissingColumn {
            column,
            path: path.to_path_buf(),
        }),
        None => Ok(()),
    }
}

/// CSV files directly under `dir`, sorted by path for deterministic reads.
/// A missing directory reads as an empty list.
///
/// # Errors
///
/// Returns [`IoError::Read`] when the directory exists but cannot be listed.
pub(crate) fn csv_files(dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(dir).map_err(|e| IoError::Read {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IoError::Read {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
