//! Duplicate rows and duplicate identifiers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Check;
use crate::findings::{CheckCategory, Finding, Findings, Metrics};
use crate::roles::RoleHints;
use crate::schema::{Column, Table};
use crate::stats::percent;

/// Duplicate values in one identifier column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifierDuplicates {
    pub column: String,
    /// Rows repeating a value seen on an earlier row.
    pub duplicate_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub row_count: usize,
    /// Rows identical, cell by cell, to an earlier row.
    pub duplicate_rows: usize,
    pub duplicate_percent: f64,
    /// Identifier columns that were present and checked.
    pub identifiers: Vec<IdentifierDuplicates>,
}

impl DuplicateReport {
    /// Result for an identifier column, if that column was present.
    pub fn identifier(&self, column: &str) -> Option<&IdentifierDuplicates> {
        self.identifiers.iter().find(|i| i.column == column)
    }
}

/// Counts fully duplicated rows and repeated identifiers.
pub struct DuplicateCheck {
    identifier_columns: Vec<String>,
}

impl DuplicateCheck {
    pub fn new(identifier_columns: Vec<String>) -> Self {
        Self { identifier_columns }
    }

    fn duplicate_values(column: &Column) -> usize {
        let mut seen = HashSet::with_capacity(column.len());
        column.values.iter().filter(|v| !seen.insert(v.key())).count()
    }
}

impl Check for DuplicateCheck {
    type Report = DuplicateReport;

    fn run(&self, table: &Table, _hints: &RoleHints) -> DuplicateReport {
        let row_count = table.row_count();

        let mut seen = HashSet::with_capacity(row_count);
        let duplicate_rows = (0..row_count)
            .filter(|&row| !seen.insert(table.row_key(row)))
            .count();

        // Each identifier is optional on its own.
        let identifiers = self
            .identifier_columns
            .iter()
            .filter_map(|name| table.column(name))
            .map(|column| IdentifierDuplicates {
                column: column.name.clone(),
                duplicate_count: Self::duplicate_values(column),
            })
            .collect();

        DuplicateReport {
            row_count,
            duplicate_rows,
            duplicate_percent: percent(duplicate_rows, row_count),
            identifiers,
        }
    }
}

impl Findings for DuplicateReport {
    fn findings(&self) -> Vec<Finding> {
        let message = format!(
            "Complete duplicate rows: {} ({:.2}%)",
            self.duplicate_rows, self.duplicate_percent
        );
        let metrics = Metrics::new()
            .with_count(self.duplicate_rows)
            .with_percentage(self.duplicate_percent);
        let rows = if self.duplicate_rows > 0 {
            Finding::warning(CheckCategory::Duplicates, message)
        } else {
            Finding::info(CheckCategory::Duplicates, message)
        };

        let mut findings = vec![rows.with_metrics(metrics)];
        for id in &self.identifiers {
            let message = format!("Duplicate {} values: {}", id.column, id.duplicate_count);
            let finding = if id.duplicate_count > 0 {
                Finding::warning(CheckCategory::Duplicates, message)
            } else {
                Finding::info(CheckCategory::Duplicates, message)
            };
            findings.push(
                finding
                    .for_column(&id.column)
                    .with_metrics(Metrics::new().with_count(id.duplicate_count)),
            );
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_IDENTIFIER_COLUMNS;
    use crate::input::Parser;

    fn check() -> DuplicateCheck {
        DuplicateCheck::new(
            DEFAULT_IDENTIFIER_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    fn run(csv: &str) -> DuplicateReport {
        let table = Parser::new().load_str(csv).unwrap();
        check().run(&table, &RoleHints::default())
    }

    #[test]
    fn test_full_row_duplicates() {
        let report = run("Booking ID,Status\nB1,ok\nB2,ok\nB1,ok\nB1,ok\n");
        assert_eq!(report.duplicate_rows, 2);
        assert!((report.duplicate_percent - 50.0).abs() < 1e-9);
        assert_eq!(report.identifier("Booking ID").unwrap().duplicate_count, 2);
    }

    #[test]
    fn test_identifier_duplicates_ignore_other_columns() {
        let report = run("Booking ID,Status\nB1,ok\nB1,late\nB2,ok\n");
        assert_eq!(report.duplicate_rows, 0);
        assert_eq!(report.identifier("Booking ID").unwrap().duplicate_count, 1);
    }

    #[test]
    fn test_absent_identifiers_are_skipped_independently() {
        let report = run("Reservation ID,Status\nR1,ok\nR1,ok\n");
        assert!(report.identifier("Booking ID").is_none());
        assert_eq!(report.identifier("Reservation ID").unwrap().duplicate_count, 1);
    }

    #[test]
    fn test_whitespace_and_case_are_significant() {
        let report = run("Status\nok\nOK\nok \n");
        assert_eq!(report.duplicate_rows, 0);
    }

    #[test]
    fn test_nulls_compare_equal() {
        let report = run("a,b\n1,\n1,NA\n");
        assert_eq!(report.duplicate_rows, 1);
    }

    #[test]
    fn test_empty_table() {
        let report = run("Booking ID\n");
        assert_eq!(report.duplicate_rows, 0);
        assert_eq!(report.duplicate_percent, 0.0);
    }
}
