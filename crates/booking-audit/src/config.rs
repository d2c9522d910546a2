//! Audit configuration.

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{AuditError, Result};
use crate::input::ParserConfig;
use crate::roles::RoleKeywords;

/// Numeric columns screened for IQR outliers.
pub const DEFAULT_OUTLIER_COLUMNS: &[&str] = &[
    "Party Size",
    "Search Days Ahead",
    "Reservation Days Ahead",
    "Total Cost",
    "Reservation Cost",
];

/// Identifier columns checked for duplicate values. The first one is the
/// primary identifier carried into the summary.
pub const DEFAULT_IDENTIFIER_COLUMNS: &[&str] = &["Booking ID", "Reservation ID"];

/// Tunable limits used by the checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Missing percentage above which a column is critical.
    pub critical_missing_percent: f64,
    /// IQR multiplier for the outlier fences.
    pub iqr_multiplier: f64,
    /// Text columns need strictly fewer distinct values than this.
    pub max_categories: usize,
    /// Outlier values are sampled only when fewer than this many exist.
    pub outlier_sample_limit: usize,
    /// How many outlier values to sample.
    pub outlier_sample_size: usize,
    /// Dates before this year are reported as possible errors.
    pub min_plausible_year: i32,
    /// Allowed gap between stated and calculated totals.
    pub cost_tolerance: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            critical_missing_percent: 20.0,
            iqr_multiplier: 1.5,
            max_categories: 20,
            outlier_sample_limit: 10,
            outlier_sample_size: 5,
            min_plausible_year: 2000,
            cost_tolerance: 0.01,
        }
    }
}

/// Configuration for an audit run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    pub thresholds: Thresholds,
    /// Keyword sets for role inference.
    pub keywords: RoleKeywords,
    pub outlier_columns: Vec<String>,
    pub identifier_columns: Vec<String>,
    /// "Now" for future-date checks (None = local clock at audit time).
    pub reference_time: Option<NaiveDateTime>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            thresholds: Thresholds::default(),
            keywords: RoleKeywords::default(),
            outlier_columns: DEFAULT_OUTLIER_COLUMNS.iter().map(|s| s.to_string()).collect(),
            identifier_columns: DEFAULT_IDENTIFIER_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            reference_time: None,
        }
    }
}

impl AuditConfig {
    /// Load a configuration from a JSON file; missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| AuditError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the checks cannot work with.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        if !(0.0..=100.0).contains(&t.critical_missing_percent) {
            return Err(AuditError::Config(format!(
                "critical_missing_percent must be within 0-100, got {}",
                t.critical_missing_percent
            )));
        }
        if !t.iqr_multiplier.is_finite() || t.iqr_multiplier < 0.0 {
            return Err(AuditError::Config(format!(
                "iqr_multiplier must be a non-negative number, got {}",
                t.iqr_multiplier
            )));
        }
        if !t.cost_tolerance.is_finite() || t.cost_tolerance < 0.0 {
            return Err(AuditError::Config(format!(
                "cost_tolerance must be a non-negative number, got {}",
                t.cost_tolerance
            )));
        }
        Ok(())
    }

    /// The instant dates are compared against.
    pub fn reference_time(&self) -> NaiveDateTime {
        self.reference_time
            .unwrap_or_else(|| Local::now().naive_local())
    }

    /// The identifier whose duplicates are carried into the summary.
    pub fn primary_identifier(&self) -> Option<&str> {
        self.identifier_columns.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AuditConfig::default();
        assert_eq!(config.thresholds.critical_missing_percent, 20.0);
        assert_eq!(config.outlier_columns.len(), 5);
        assert_eq!(config.primary_identifier(), Some("Booking ID"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"thresholds": {{"max_categories": 8}}, "reference_time": "2025-06-01T00:00:00"}}"#
        )
        .unwrap();

        let config = AuditConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.thresholds.max_categories, 8);
        assert_eq!(config.thresholds.iqr_multiplier, 1.5);
        assert_eq!(
            config.reference_time().to_string(),
            "2025-06-01 00:00:00"
        );
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let mut config = AuditConfig::default();
        config.thresholds.critical_missing_percent = 150.0;
        assert!(matches!(config.validate(), Err(AuditError::Config(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let err = AuditConfig::from_json_file("/no/such/config.json").unwrap_err();
        assert!(matches!(err, AuditError::Io { .. }));
    }
}
