//! Missing value analysis.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Check;
use crate::findings::{CheckCategory, Finding, Findings, Metrics};
use crate::roles::RoleHints;
use crate::schema::Table;
use crate::stats::percent;

/// Missing values of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub column: String,
    pub missing_count: usize,
    pub non_missing_count: usize,
    pub missing_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingReport {
    pub row_count: usize,
    pub total_missing: usize,
    pub total_cells: usize,
    pub overall_percent: f64,
    /// Threshold the critical subset was computed with.
    pub critical_percent: f64,
    /// Every column, in table order.
    pub columns: Vec<ColumnMissing>,
}

impl MissingReport {
    /// Columns with at least one missing value, most missing first.
    pub fn with_missing(&self) -> Vec<&ColumnMissing> {
        let mut cols: Vec<&ColumnMissing> =
            self.columns.iter().filter(|c| c.missing_count > 0).collect();
        cols.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));
        cols
    }

    /// Columns whose missing rate exceeds the critical threshold.
    pub fn critical(&self) -> Vec<&ColumnMissing> {
        self.with_missing()
            .into_iter()
            .filter(|c| c.missing_percent > self.critical_percent)
            .collect()
    }
}

/// Counts missing values per column and overall.
pub struct MissingValuesCheck {
    critical_percent: f64,
}

impl MissingValuesCheck {
    pub fn new(critical_percent: f64) -> Self {
        Self { critical_percent }
    }
}

impl Default for MissingValuesCheck {
    fn default() -> Self {
        Self::new(20.0)
    }
}

impl Check for MissingValuesCheck {
    type Report = MissingReport;

    fn run(&self, table: &Table, _hints: &RoleHints) -> MissingReport {
        let row_count = table.row_count();
        let columns: Vec<ColumnMissing> = table
            .columns()
            .iter()
            .map(|col| {
                let missing_count = col.null_count();
                ColumnMissing {
                    column: col.name.clone(),
                    missing_count,
                    non_missing_count: row_count - missing_count,
                    missing_percent: percent(missing_count, row_count),
                }
            })
            .collect();

        let total_missing = columns.iter().map(|c| c.missing_count).sum();
        let total_cells = table.cell_count();

        MissingReport {
            row_count,
            total_missing,
            total_cells,
            overall_percent: percent(total_missing, total_cells),
            critical_percent: self.critical_percent,
            columns,
        }
    }
}

impl Findings for MissingReport {
    fn findings(&self) -> Vec<Finding> {
        let mut findings = vec![
            Finding::info(
                CheckCategory::Missing,
                format!(
                    "Total missing values: {} out of {} cells ({:.2}%)",
                    self.total_missing, self.total_cells, self.overall_percent
                ),
            )
            .with_metrics(
                Metrics::new()
                    .with_count(self.total_missing)
                    .with_percentage(self.overall_percent),
            ),
        ];

        let with_missing = self.with_missing();
        if with_missing.is_empty() {
            findings.push(Finding::info(
                CheckCategory::Missing,
                "No missing values found in any column.",
            ));
            return findings;
        }

        for col in &with_missing {
            findings.push(
                Finding::warning(
                    CheckCategory::Missing,
                    format!(
                        "'{}' has {} missing values ({:.2}%)",
                        col.column, col.missing_count, col.missing_percent
                    ),
                )
                .for_column(&col.column)
                .with_metrics(
                    Metrics::new()
                        .with_count(col.missing_count)
                        .with_percentage(col.missing_percent),
                ),
            );
        }

        let critical = self.critical();
        if !critical.is_empty() {
            findings.push(
                Finding::warning(
                    CheckCategory::Missing,
                    format!(
                        "{} columns with critical missing rates (>{}%)",
                        critical.len(),
                        self.critical_percent
                    ),
                )
                .with_details(
                    critical
                        .iter()
                        .map(|c| format!("{}: {:.2}%", c.column, c.missing_percent))
                        .collect(),
                )
                .with_metrics(
                    Metrics::new().with_count(critical.len()).with_detail(json!(
                        critical.iter().map(|c| &c.column).collect::<Vec<_>>()
                    )),
                ),
            );
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;

    fn run(csv: &str) -> MissingReport {
        let table = Parser::new().load_str(csv).unwrap();
        MissingValuesCheck::default().run(&table, &RoleHints::default())
    }

    #[test]
    fn test_counts_and_percentages() {
        let report = run("a,b,c\n1,,x\n2,,\n3,4,y\n4,5,z\n5,6,w\n");
        assert_eq!(report.total_missing, 3);
        assert_eq!(report.total_cells, 15);
        assert!((report.overall_percent - 20.0).abs() < 1e-9);

        let b = &report.columns[1];
        assert_eq!(b.missing_count, 2);
        assert_eq!(b.missing_count + b.non_missing_count, 5);
        assert!((b.missing_percent - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_critical_is_strictly_above_threshold() {
        // b: 40% missing, c: 20% missing (not critical)
        let report = run("a,b,c\n1,,x\n2,,\n3,4,y\n4,5,z\n5,6,w\n");
        let critical: Vec<&str> = report.critical().iter().map(|c| c.column.as_str()).collect();
        assert_eq!(critical, vec!["b"]);

        let with_missing: Vec<&str> =
            report.with_missing().iter().map(|c| c.column.as_str()).collect();
        assert_eq!(with_missing, vec!["b", "c"]);
    }

    #[test]
    fn test_no_missing_is_a_positive_finding() {
        let report = run("a,b\n1,2\n3,4\n");
        let findings = report.findings();
        assert!(findings.iter().any(|f| f.message.contains("No missing values")));
        assert!(!findings.iter().any(|f| f.is_warning()));
    }

    #[test]
    fn test_empty_table_has_zero_percentages() {
        let report = run("a,b\n");
        assert_eq!(report.total_cells, 0);
        assert_eq!(report.overall_percent, 0.0);
        assert_eq!(report.columns[0].missing_percent, 0.0);
    }
}
