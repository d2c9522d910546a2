//! A named, typed column of cells.

use indexmap::IndexMap;

use super::types::{ColumnType, Value};

/// One column of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name as it appeared in the header.
    pub name: String,
    /// Logical type shared by every non-null value.
    pub column_type: ColumnType,
    /// One value per row.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column with the given type and values.
    pub fn new(name: impl Into<String>, column_type: ColumnType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            column_type,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of null cells.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Iterate over the non-null cells in row order.
    pub fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_null())
    }

    /// Non-null numeric values in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_f64).collect()
    }

    /// Counts of each distinct non-null text value, in order of first appearance.
    pub fn text_counts(&self) -> IndexMap<&str, usize> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for value in self.values.iter().filter_map(Value::as_text) {
            *counts.entry(value).or_insert(0) += 1;
        }
        counts
    }

    /// The first non-null value rendered as text, if any.
    pub fn first_non_null_text(&self) -> Option<String> {
        self.non_null().next().map(|v| v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_counts_keep_first_appearance_order() {
        let col = Column::new(
            "Status",
            ColumnType::Text,
            vec![
                Value::Text("b".into()),
                Value::Null,
                Value::Text("a".into()),
                Value::Text("b".into()),
            ],
        );
        let counts = col.text_counts();
        let keys: Vec<&str> = counts.keys().copied().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(counts["b"], 2);
        assert_eq!(col.null_count(), 1);
    }

    #[test]
    fn test_numeric_values_skip_nulls() {
        let col = Column::new(
            "Party Size",
            ColumnType::Integer,
            vec![Value::Integer(2), Value::Null, Value::Integer(4)],
        );
        assert_eq!(col.numeric_values(), vec![2.0, 4.0]);
    }
}
