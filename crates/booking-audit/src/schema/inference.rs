//! Column type inference for raw string cells.

use crate::input::DataTable;

use super::column::Column;
use super::temporal::parse_datetime;
use super::types::{ColumnType, Value};

/// Infer a column's type from its raw cells and convert them.
///
/// The first type that every non-null cell satisfies wins, in the order
/// integer, float, boolean, date (when `infer_dates`), text. A column without
/// any non-null cell is text.
pub fn infer_column<'a>(
    name: &str,
    raw: impl IntoIterator<Item = &'a str>,
    infer_dates: bool,
) -> Column {
    let cells: Vec<Option<&str>> = raw
        .into_iter()
        .map(|v| if DataTable::is_null_value(v) { None } else { Some(v) })
        .collect();
    let present = || cells.iter().flatten().copied();

    let column_type = if present().next().is_none() {
        ColumnType::Text
    } else if present().all(|v| v.trim().parse::<i64>().is_ok()) {
        ColumnType::Integer
    } else if present().all(|v| v.trim().parse::<f64>().is_ok()) {
        ColumnType::Float
    } else if present().all(|v| parse_bool(v).is_some()) {
        ColumnType::Boolean
    } else if infer_dates && present().all(|v| parse_datetime(v).is_some()) {
        if present().any(|v| parse_datetime(v).is_some_and(|d| d.has_time)) {
            ColumnType::DateTime
        } else {
            ColumnType::Date
        }
    } else {
        ColumnType::Text
    };

    let values = cells
        .iter()
        .map(|cell| match cell {
            None => Value::Null,
            Some(raw) => convert(raw, column_type),
        })
        .collect();

    Column::new(name, column_type, values)
}

fn convert(raw: &str, column_type: ColumnType) -> Value {
    let trimmed = raw.trim();
    let converted = match column_type {
        ColumnType::Integer => trimmed.parse().ok().map(Value::Integer),
        ColumnType::Float => trimmed.parse().ok().map(Value::Float),
        ColumnType::Boolean => parse_bool(trimmed).map(Value::Boolean),
        ColumnType::Date | ColumnType::DateTime => {
            parse_datetime(trimmed).map(|d| Value::Date(d.value))
        }
        ColumnType::Text => None,
    };
    converted.unwrap_or_else(|| Value::Text(raw.to_string()))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_integer_with_nulls() {
        let col = infer_column("Party Size", ["2", "", "4", "NA"], true);
        assert_eq!(col.column_type, ColumnType::Integer);
        assert_eq!(col.values[0], Value::Integer(2));
        assert!(col.values[1].is_null());
        assert!(col.values[3].is_null());
    }

    #[test]
    fn test_mixed_integers_and_decimals_are_float() {
        let col = infer_column("Total Cost", ["10", "12.50"], true);
        assert_eq!(col.column_type, ColumnType::Float);
    }

    #[test]
    fn test_infer_boolean_any_case() {
        let col = infer_column("Is Canceled", ["True", "false", "TRUE"], true);
        assert_eq!(col.column_type, ColumnType::Boolean);
        assert_eq!(col.values[1], Value::Boolean(false));
    }

    #[test]
    fn test_infer_dates_and_datetimes() {
        let dates = infer_column("Booking Date", ["2024-01-01", "2024-02-01"], true);
        assert_eq!(dates.column_type, ColumnType::Date);

        let stamps = infer_column("Created", ["2024-01-01", "2024-02-01 10:00:00"], true);
        assert_eq!(stamps.column_type, ColumnType::DateTime);

        let text = infer_column("Booking Date", ["2024-01-01", "2024-02-01"], false);
        assert_eq!(text.column_type, ColumnType::Text);
    }

    #[test]
    fn test_currency_stays_text_and_raw() {
        let col = infer_column("Total Cost ($)", ["$1,200.00", " $15 "], true);
        assert_eq!(col.column_type, ColumnType::Text);
        assert_eq!(col.values[1], Value::Text(" $15 ".into()));
    }

    #[test]
    fn test_all_null_column_is_text() {
        let col = infer_column("Notes", ["", "NA"], true);
        assert_eq!(col.column_type, ColumnType::Text);
        assert_eq!(col.null_count(), 2);
    }
}
