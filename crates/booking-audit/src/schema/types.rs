//! Core type definitions for the typed table.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Logical data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Boolean values (true/false).
    Boolean,
    /// Date only (no time component).
    Date,
    /// Date and time values.
    DateTime,
    /// Free text; also the type of columns with no values at all.
    Text,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Date | ColumnType::DateTime)
    }

    /// Get a short label for the type.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
            ColumnType::Text => "text",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Dates without a time component are stored at midnight.
    Date(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell; NaN counts as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) if !f.is_nan() => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Hashable identity of the cell, used for row and identifier equality.
    pub fn key(&self) -> ValueKey<'_> {
        match self {
            Value::Null => ValueKey::Null,
            Value::Text(s) => ValueKey::Text(s),
            Value::Integer(i) => ValueKey::Integer(*i),
            // -0.0 and 0.0 compare equal as numbers, so they must share a key.
            Value::Float(f) if *f == 0.0 => ValueKey::Float(0.0f64.to_bits()),
            Value::Float(f) if f.is_nan() => ValueKey::Null,
            Value::Float(f) => ValueKey::Float(f.to_bits()),
            Value::Boolean(b) => ValueKey::Boolean(*b),
            Value::Date(d) => ValueKey::Date(*d),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Boolean(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Value::Date(d) => write!(f, "{}", d),
        }
    }
}

/// Borrowed, hashable form of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKey<'a> {
    Null,
    Text(&'a str),
    Integer(i64),
    Float(u64),
    Boolean(bool),
    Date(NaiveDateTime),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_view() {
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Float(f64::NAN).as_f64(), None);
        assert_eq!(Value::Text("3".into()).as_f64(), None);
    }

    #[test]
    fn test_signed_zero_shares_key() {
        assert_eq!(Value::Float(0.0).key(), Value::Float(-0.0).key());
        assert_ne!(Value::Float(1.0).key(), Value::Integer(1).key());
    }

    #[test]
    fn test_type_predicates() {
        assert!(ColumnType::Float.is_numeric());
        assert!(!ColumnType::Boolean.is_numeric());
        assert!(ColumnType::DateTime.is_temporal());
        assert_eq!(ColumnType::Text.to_string(), "text");
    }
}
