//! CSV/TSV parser with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::source::{DataTable, SourceMetadata};
use crate::error::{AuditError, Result};
use crate::schema::Table;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<char>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: char,
    /// Type text columns whose every value parses as a date as dates.
    pub infer_dates: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: '"',
            infer_dates: false,
        }
    }
}

/// Parses tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Load a file into a typed [`Table`] together with its metadata.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let (raw, source) = self.parse_file(path)?;
        let table = Table::from_raw(&raw, self.config.infer_dates);
        info!(
            file = %source.file,
            rows = source.row_count,
            columns = source.column_count,
            "loaded dataset"
        );
        Ok((table, source))
    }

    /// Load in-memory delimited text into a typed [`Table`].
    pub fn load_str(&self, text: &str) -> Result<Table> {
        let bytes = text.as_bytes();
        let delimiter = self.resolve_delimiter(bytes)?;
        let raw = self.parse_bytes(bytes, delimiter)?;
        Ok(Table::from_raw(&raw, self.config.infer_dates))
    }

    /// Parse a file and return the raw data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |source| AuditError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = self.resolve_delimiter(&contents)?;
        let data_table = self.parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            data_table.row_count(),
            data_table.column_count(),
        );

        Ok((data_table, source_metadata))
    }

    fn resolve_delimiter(&self, bytes: &[u8]) -> Result<u8> {
        match self.config.delimiter {
            Some(d) => ascii_byte(d, "delimiter"),
            None => detect_delimiter(bytes),
        }
    }

    /// Parse bytes directly.
    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let quote = ascii_byte(self.config.quote, "quote")?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            let record = result?;
            if self.config.has_header && record.len() > headers.len() {
                let line = record.position().map_or(row_idx as u64 + 2, |p| p.line());
                return Err(AuditError::Shape(format!(
                    "line {}: expected {} fields, saw {}",
                    line,
                    headers.len(),
                    record.len()
                )));
            }
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        let headers = if self.config.has_header {
            headers
        } else {
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(AuditError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        for row in &mut rows {
            row.resize(expected_cols, String::new());
        }

        debug!(
            rows = rows.len(),
            columns = expected_cols,
            delimiter = %(delimiter as char).escape_default(),
            "parsed delimited data"
        );

        Ok(DataTable::new(headers, rows, delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn ascii_byte(c: char, what: &str) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(AuditError::InvalidDelimiter(format!(
            "{} '{}' is not a single-byte ASCII character",
            what, c
        )))
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(AuditError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tabs rarely occur inside values.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
