//! Per-column outcomes: either a result or the reason a column was skipped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::ColumnType;

/// Why a column could not be analyzed by a check.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("column is stored as {found}, not as a number")]
    NotNumeric { found: ColumnType },

    #[error("column holds {found} values, which cannot be read as dates")]
    NotTemporal { found: ColumnType },

    #[error("column has no usable values")]
    NoValues,

    #[error("could not be converted to dates - invalid format")]
    InvalidDateFormat,

    #[error("value '{value}' could not be converted to a number")]
    Unparseable { value: String },
}

/// Result of running a check on one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ColumnOutcome<T> {
    Analyzed { column: String, report: T },
    Skipped { column: String, reason: SkipReason },
}

impl<T> ColumnOutcome<T> {
    /// Wrap a per-column result, turning an error into a skip.
    pub fn from_result(column: impl Into<String>, result: Result<T, SkipReason>) -> Self {
        let column = column.into();
        match result {
            Ok(report) => ColumnOutcome::Analyzed { column, report },
            Err(reason) => {
                tracing::warn!(%column, %reason, "column skipped");
                ColumnOutcome::Skipped { column, reason }
            }
        }
    }

    pub fn column(&self) -> &str {
        match self {
            ColumnOutcome::Analyzed { column, .. } | ColumnOutcome::Skipped { column, .. } => {
                column
            }
        }
    }

    pub fn report(&self) -> Option<&T> {
        match self {
            ColumnOutcome::Analyzed { report, .. } => Some(report),
            ColumnOutcome::Skipped { .. } => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            ColumnOutcome::Skipped { reason, .. } => Some(reason),
            ColumnOutcome::Analyzed { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ColumnOutcome::Skipped { .. })
    }
}
