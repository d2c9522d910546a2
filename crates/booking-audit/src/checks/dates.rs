//! Date range validation for date-like columns.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Check;
use crate::findings::{
    CheckCategory, ColumnOutcome, Finding, Findings, Metrics, SkipReason, skipped_column,
};
use crate::roles::{Role, RoleHints};
use crate::schema::{Column, ColumnType, Table, Value, parse_datetime};
use crate::stats::percent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRangeStats {
    pub parsed_count: usize,
    /// Non-null cells that did not parse as a date.
    pub unparsed_count: usize,
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
    /// Dates strictly after the reference time.
    pub future_count: usize,
    /// Percentage of all rows.
    pub future_percent: f64,
    pub pre_min_year_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRangeReport {
    pub reference_time: NaiveDateTime,
    pub min_year: i32,
    pub columns: Vec<ColumnOutcome<DateRangeStats>>,
}

/// Checks date-like columns for future and implausibly old dates.
pub struct DateRangeCheck {
    reference_time: NaiveDateTime,
    min_year: i32,
}

impl DateRangeCheck {
    pub fn new(reference_time: NaiveDateTime, min_year: i32) -> Self {
        Self {
            reference_time,
            min_year,
        }
    }

    /// Parsed dates of a column plus the count of cells that failed to parse.
    fn dates(column: &Column) -> Result<(Vec<NaiveDateTime>, usize), SkipReason> {
        match column.column_type {
            ColumnType::Date | ColumnType::DateTime => {
                Ok((column.values.iter().filter_map(Value::as_datetime).collect(), 0))
            }
            ColumnType::Text => {
                let mut dates = Vec::new();
                let mut failed = 0;
                for value in column.values.iter().filter_map(Value::as_text) {
                    match parse_datetime(value) {
                        Some(parsed) => dates.push(parsed.value),
                        None => failed += 1,
                    }
                }
                Ok((dates, failed))
            }
            found => Err(SkipReason::NotTemporal { found }),
        }
    }

    fn analyze(&self, column: &Column, row_count: usize) -> Result<DateRangeStats, SkipReason> {
        let (dates, unparsed_count) = Self::dates(column)?;
        let min = dates.iter().min().copied().ok_or(SkipReason::InvalidDateFormat)?;
        let max = dates.iter().max().copied().ok_or(SkipReason::InvalidDateFormat)?;

        let future_count = dates.iter().filter(|d| **d > self.reference_time).count();
        let pre_min_year_count = dates.iter().filter(|d| d.year() < self.min_year).count();

        Ok(DateRangeStats {
            parsed_count: dates.len(),
            unparsed_count,
            min,
            max,
            future_count,
            future_percent: percent(future_count, row_count),
            pre_min_year_count,
        })
    }
}

impl Check for DateRangeCheck {
    type Report = DateRangeReport;

    fn run(&self, table: &Table, hints: &RoleHints) -> DateRangeReport {
        let columns = hints
            .columns_with(Role::Date)
            .filter_map(|name| table.column(name))
            .map(|column| {
                ColumnOutcome::from_result(&column.name, self.analyze(column, table.row_count()))
            })
            .collect();

        DateRangeReport {
            reference_time: self.reference_time,
            min_year: self.min_year,
            columns,
        }
    }
}

impl Findings for DateRangeReport {
    fn findings(&self) -> Vec<Finding> {
        if self.columns.is_empty() {
            return vec![Finding::info(
                CheckCategory::DateRange,
                "No date-like columns found",
            )];
        }

        let mut findings = Vec::new();
        for outcome in &self.columns {
            let (column, stats) = match outcome {
                ColumnOutcome::Analyzed { column, report } => (column, report),
                ColumnOutcome::Skipped { column, reason } => {
                    findings.push(skipped_column(
                        CheckCategory::DateRange,
                        "date range",
                        column,
                        reason,
                    ));
                    continue;
                }
            };

            let mut details = Vec::new();
            if stats.unparsed_count > 0 {
                details.push(format!("{} values could not be parsed", stats.unparsed_count));
            }
            findings.push(
                Finding::info(
                    CheckCategory::DateRange,
                    format!("'{}' range: {} to {}", column, stats.min, stats.max),
                )
                .for_column(column)
                .with_details(details)
                .with_metrics(Metrics::new().with_count(stats.parsed_count)),
            );

            if stats.future_count > 0 {
                findings.push(
                    Finding::warning(
                        CheckCategory::DateRange,
                        format!(
                            "'{}' has {} future dates ({:.2}%)",
                            column, stats.future_count, stats.future_percent
                        ),
                    )
                    .for_column(column)
                    .with_metrics(
                        Metrics::new()
                            .with_count(stats.future_count)
                            .with_percentage(stats.future_percent),
                    ),
                );
            }

            if stats.pre_min_year_count > 0 {
                findings.push(
                    Finding::warning(
                        CheckCategory::DateRange,
                        format!(
                            "'{}' has {} dates before {} (possible errors)",
                            column, stats.pre_min_year_count, self.min_year
                        ),
                    )
                    .for_column(column)
                    .with_metrics(Metrics::new().with_count(stats.pre_min_year_count)),
                );
            }
        }
        findings
    }
}
