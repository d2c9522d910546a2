//! Roll-up of missing-value and duplicate issues.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::duplicates::DuplicateReport;
use super::missing::MissingReport;
use crate::findings::{CheckCategory, Finding, Findings, Metrics};

/// One issue carried into the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum SummaryIssue {
    ColumnsWithMissing { count: usize },
    CriticalMissing { count: usize, threshold: f64 },
    DuplicateRows { count: usize },
    DuplicateIdentifiers { column: String, count: usize },
}

impl SummaryIssue {
    pub fn count(&self) -> usize {
        match self {
            SummaryIssue::ColumnsWithMissing { count }
            | SummaryIssue::CriticalMissing { count, .. }
            | SummaryIssue::DuplicateRows { count }
            | SummaryIssue::DuplicateIdentifiers { count, .. } => *count,
        }
    }
}

impl fmt::Display for SummaryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryIssue::ColumnsWithMissing { count } => {
                write!(f, "{} columns with missing values", count)
            }
            SummaryIssue::CriticalMissing { count, threshold } => {
                write!(f, "{} columns with critical missing rates (>{}%)", count, threshold)
            }
            SummaryIssue::DuplicateRows { count } => write!(f, "{} duplicate rows detected", count),
            SummaryIssue::DuplicateIdentifiers { column, count } => {
                write!(f, "{} duplicate {}s", count, column)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub issues: Vec<SummaryIssue>,
}

impl SummaryReport {
    /// Aggregate the missing-value and duplicate reports. Only the primary
    /// identifier's duplicates are carried over.
    pub fn from_reports(
        missing: &MissingReport,
        duplicates: &DuplicateReport,
        primary_identifier: Option<&str>,
    ) -> Self {
        let mut issues = Vec::new();

        let with_missing = missing.with_missing().len();
        if with_missing > 0 {
            issues.push(SummaryIssue::ColumnsWithMissing {
                count: with_missing,
            });
        }
        let critical = missing.critical().len();
        if critical > 0 {
            issues.push(SummaryIssue::CriticalMissing {
                count: critical,
                threshold: missing.critical_percent,
            });
        }
        if duplicates.duplicate_rows > 0 {
            issues.push(SummaryIssue::DuplicateRows {
                count: duplicates.duplicate_rows,
            });
        }
        if let Some(id) = primary_identifier.and_then(|name| duplicates.identifier(name)) {
            if id.duplicate_count > 0 {
                issues.push(SummaryIssue::DuplicateIdentifiers {
                    column: id.column.clone(),
                    count: id.duplicate_count,
                });
            }
        }

        Self { issues }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl Findings for SummaryReport {
    fn findings(&self) -> Vec<Finding> {
        if self.is_clean() {
            return vec![Finding::info(
                CheckCategory::Summary,
                "No significant data quality issues were identified.",
            )];
        }

        self.issues
            .iter()
            .map(|issue| {
                let finding = Finding::warning(CheckCategory::Summary, issue.to_string())
                    .with_metrics(Metrics::new().with_count(issue.count()));
                match issue {
                    SummaryIssue::DuplicateIdentifiers { column, .. } => finding.for_column(column),
                    _ => finding,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{Check, DuplicateCheck, MissingValuesCheck};
    use crate::input::Parser;
    use crate::roles::RoleHints;

    fn summarize(csv: &str) -> SummaryReport {
        let table = Parser::new().load_str(csv).unwrap();
        let hints = RoleHints::default();
        let missing = MissingValuesCheck::default().run(&table, &hints);
        let duplicates = DuplicateCheck::new(vec!["Booking ID".into(), "Reservation ID".into()])
            .run(&table, &hints);
        SummaryReport::from_reports(&missing, &duplicates, Some("Booking ID"))
    }

    #[test]
    fn test_clean_dataset() {
        let report = summarize("Booking ID,Status\nB1,ok\nB2,ok\n");
        assert!(report.is_clean());
        let findings = report.findings();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "No significant data quality issues were identified.");
    }

    #[test]
    fn test_collects_issues_in_order() {
        let report = summarize("Booking ID,Status\nB1,\nB1,\nB2,ok\n");
        assert_eq!(
            report.issues,
            vec![
                SummaryIssue::ColumnsWithMissing { count: 1 },
                SummaryIssue::CriticalMissing {
                    count: 1,
                    threshold: 20.0
                },
                SummaryIssue::DuplicateRows { count: 1 },
                SummaryIssue::DuplicateIdentifiers {
                    column: "Booking ID".into(),
                    count: 1
                },
            ]
        );
        assert_eq!(report.issues[3].to_string(), "1 duplicate Booking IDs");
    }

    #[test]
    fn test_secondary_identifier_not_summarized() {
        let report = summarize("Reservation ID,Status\nR1,a\nR1,b\n");
        assert!(report.is_clean());
    }
}
