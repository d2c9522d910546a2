//! IQR outlier detection for key numeric columns.

use serde::{Deserialize, Serialize};

use super::Check;
use crate::findings::{
    CheckCategory, ColumnOutcome, Finding, Findings, Metrics, SkipReason, skipped_column,
};
use crate::roles::RoleHints;
use crate::schema::{Column, Table};
use crate::stats::{percent, quantile, round2, sorted};

/// Tukey fences for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBounds {
    /// Compute the fences; `None` for an empty series.
    pub fn from_values(values: &[f64], multiplier: f64) -> Option<Self> {
        let sorted = sorted(values);
        let q1 = quantile(&sorted, 0.25)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    /// Whether a value lies strictly outside the fences.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierStats {
    pub bounds: OutlierBounds,
    pub outlier_count: usize,
    /// Percentage of all rows, nulls included.
    pub outlier_percent: f64,
    /// First outlier values in row order; empty unless the set is small.
    pub samples: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub columns: Vec<ColumnOutcome<OutlierStats>>,
}

/// Screens an allow-list of numeric columns with the IQR rule.
pub struct OutlierCheck {
    columns: Vec<String>,
    multiplier: f64,
    sample_limit: usize,
    sample_size: usize,
}

impl OutlierCheck {
    pub fn new(
        columns: Vec<String>,
        multiplier: f64,
        sample_limit: usize,
        sample_size: usize,
    ) -> Self {
        Self {
            columns,
            multiplier,
            sample_limit,
            sample_size,
        }
    }

    fn analyze(&self, column: &Column, row_count: usize) -> Result<OutlierStats, SkipReason> {
        if !column.column_type.is_numeric() {
            return Err(SkipReason::NotNumeric {
                found: column.column_type,
            });
        }

        let values = column.numeric_values();
        let bounds =
            OutlierBounds::from_values(&values, self.multiplier).ok_or(SkipReason::NoValues)?;

        let outliers: Vec<f64> = values.into_iter().filter(|v| bounds.is_outlier(*v)).collect();
        let outlier_count = outliers.len();
        let samples = if outlier_count > 0 && outlier_count < self.sample_limit {
            outliers.into_iter().take(self.sample_size).collect()
        } else {
            Vec::new()
        };

        Ok(OutlierStats {
            bounds,
            outlier_count,
            outlier_percent: percent(outlier_count, row_count),
            samples,
        })
    }
}

impl Check for OutlierCheck {
    type Report = OutlierReport;

    fn run(&self, table: &Table, _hints: &RoleHints) -> OutlierReport {
        let columns = self
            .columns
            .iter()
            .filter_map(|field| table.find_column(field))
            .map(|column| {
                ColumnOutcome::from_result(&column.name, self.analyze(column, table.row_count()))
            })
            .collect();
        OutlierReport { columns }
    }
}

impl Findings for OutlierReport {
    fn findings(&self) -> Vec<Finding> {
        if self.columns.is_empty() {
            return vec![Finding::info(
                CheckCategory::Outliers,
                "None of the key numeric columns are present",
            )];
        }

        self.columns
            .iter()
            .map(|outcome| match outcome {
                ColumnOutcome::Analyzed { column, report } => {
                    let b = &report.bounds;
                    let message = format!(
                        "Outliers in '{}': {} ({:.2}%)",
                        column, report.outlier_count, report.outlier_percent
                    );
                    let mut details = vec![format!(
                        "Lower bound: {:.2}, Upper bound: {:.2}",
                        b.lower, b.upper
                    )];
                    if !report.samples.is_empty() {
                        details.push(format!("Sample outlier values: {:?}", report.samples));
                    }
                    let finding = if report.outlier_count > 0 {
                        Finding::warning(CheckCategory::Outliers, message)
                    } else {
                        Finding::info(CheckCategory::Outliers, message)
                    };
                    finding
                        .for_column(column)
                        .with_details(details)
                        .with_metrics(
                            Metrics::new()
                                .with_count(report.outlier_count)
                                .with_percentage(report.outlier_percent)
                                .with_bounds(round2(b.lower), round2(b.upper))
                                .with_samples(report.samples.iter().copied()),
                        )
                }
                ColumnOutcome::Skipped { column, reason } => {
                    skipped_column(CheckCategory::Outliers, "outliers", column, reason)
                }
            })
            .collect()
    }
}
