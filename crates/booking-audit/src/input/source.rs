//! Data source metadata and the raw (untyped) table.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Spellings treated as a missing value, compared after trimming.
const NA_VALUES: &[&str] = &[
    "na", "n/a", "nan", "-nan", "null", "none", "#n/a", "#na", "<na>",
];

/// Metadata about the source data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Parsed delimited data before any type inference.
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty() || NA_VALUES.iter().any(|na| trimmed.eq_ignore_ascii_case(na))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null_value() {
        assert!(DataTable::is_null_value(""));
        assert!(DataTable::is_null_value("   "));
        assert!(DataTable::is_null_value("NA"));
        assert!(DataTable::is_null_value("n/a"));
        assert!(DataTable::is_null_value("NaN"));
        assert!(DataTable::is_null_value("NULL"));
        assert!(DataTable::is_null_value("None"));
        assert!(DataTable::is_null_value("#N/A"));
        assert!(DataTable::is_null_value("<NA>"));
        assert!(!DataTable::is_null_value("value"));
        assert!(!DataTable::is_null_value("0"));
        assert!(!DataTable::is_null_value("-"));
    }

    #[test]
    fn test_column_values_pads_short_rows() {
        let table = DataTable::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into()], vec!["2".into(), "x".into()]],
            b',',
        );
        let values: Vec<&str> = table.column_values(1).collect();
        assert_eq!(values, vec!["", "x"]);
    }
}
