//! The typed, column-major table every check reads from.

use crate::error::{AuditError, Result};
use crate::input::DataTable;

use super::column::Column;
use super::inference::infer_column;
use super::types::ValueKey;

/// An immutable table of named, typed columns of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table from typed columns, rejecting ragged input.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(AuditError::Shape(format!(
                "column '{}' has {} values, expected {}",
                bad.name,
                bad.len(),
                row_count
            )));
        }
        Ok(Self { columns, row_count })
    }

    /// Type every column of a raw table.
    pub fn from_raw(raw: &DataTable, infer_dates: bool) -> Self {
        let columns = raw
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| infer_column(name, raw.column_values(idx), infer_dates))
            .collect();
        Self {
            columns,
            row_count: raw.row_count(),
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.row_count * self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get all column names, in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Find a column by its field name, tolerating a trailing unit such as
    /// `" ($)"`: `find_column("Total Cost")` matches `"Total Cost ($)"`.
    pub fn find_column(&self, field: &str) -> Option<&Column> {
        self.column(field)
            .or_else(|| self.columns.iter().find(|c| strip_unit_suffix(&c.name) == field))
    }

    /// Hashable identity of a whole row.
    pub fn row_key(&self, row: usize) -> Vec<ValueKey<'_>> {
        self.columns.iter().map(|c| c.values[row].key()).collect()
    }
}

/// Remove a trailing parenthesised unit, e.g. `"Total Cost ($)"` -> `"Total Cost"`.
pub fn strip_unit_suffix(name: &str) -> &str {
    let trimmed = name.trim_end();
    if trimmed.ends_with(')') {
        if let Some(open) = trimmed.rfind('(') {
            return trimmed[..open].trim_end();
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnType, Value};

    #[test]
    fn test_ragged_columns_rejected() {
        let a = Column::new("a", ColumnType::Integer, vec![Value::Integer(1)]);
        let b = Column::new("b", ColumnType::Integer, vec![]);
        assert!(matches!(Table::new(vec![a, b]), Err(AuditError::Shape(_))));
    }

    #[test]
    fn test_find_column_with_unit_suffix() {
        let table = Table::new(vec![
            Column::new("Total Cost ($)", ColumnType::Float, vec![Value::Float(1.0)]),
            Column::new("Party Size", ColumnType::Integer, vec![Value::Integer(2)]),
        ])
        .unwrap();
        assert_eq!(table.find_column("Total Cost").unwrap().name, "Total Cost ($)");
        assert_eq!(table.find_column("Party Size").unwrap().name, "Party Size");
        assert!(table.find_column("Reservation Cost").is_none());
    }

    #[test]
    fn test_strip_unit_suffix() {
        assert_eq!(strip_unit_suffix("Add Ons Cost ($)"), "Add Ons Cost");
        assert_eq!(strip_unit_suffix("Packages"), "Packages");
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(Vec::new()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.cell_count(), 0);
    }
}
