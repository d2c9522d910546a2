//! Numeric fields validation: statistics, negative and zero values.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Check;
use crate::findings::{
    CheckCategory, ColumnOutcome, Finding, Findings, Metrics, SkipReason, skipped_column,
};
use crate::roles::{Role, RoleHints, RoleKeywords};
use crate::schema::{Column, ColumnType, Table, Value};
use crate::stats::{Describe, percent};

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

static CURRENCY_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[$€£¥,\s]").unwrap());

/// How a column's cells were turned into numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coercion {
    /// Already numeric.
    Native,
    /// Booleans read as 1 and 0.
    Boolean,
    /// Currency strings with symbols and separators stripped.
    Currency,
    /// Text parsed where possible; the rest became null.
    Lenient,
}

/// Convert a column to optional numbers, one per row.
///
/// Text whose first non-null value carries a currency symbol is parsed
/// strictly: one bad value rejects the column. Other text is parsed
/// leniently.
pub fn coerce_numeric(column: &Column) -> Result<(Vec<Option<f64>>, Coercion), SkipReason> {
    match column.column_type {
        ColumnType::Integer | ColumnType::Float => Ok((
            column.values.iter().map(Value::as_f64).collect(),
            Coercion::Native,
        )),
        ColumnType::Boolean => Ok((
            column
                .values
                .iter()
                .map(|v| match v {
                    Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
                    _ => None,
                })
                .collect(),
            Coercion::Boolean,
        )),
        _ => {
            let is_currency = column
                .first_non_null_text()
                .is_some_and(|first| first.contains(CURRENCY_SYMBOLS));
            if is_currency {
                let values = column
                    .values
                    .iter()
                    .map(parse_currency)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((values, Coercion::Currency))
            } else {
                let values = column
                    .values
                    .iter()
                    .map(|v| v.as_text().and_then(|s| s.trim().parse::<f64>().ok()))
                    .map(|v| v.filter(|f| !f.is_nan()))
                    .collect();
                Ok((values, Coercion::Lenient))
            }
        }
    }
}

fn parse_currency(value: &Value) -> Result<Option<f64>, SkipReason> {
    if value.is_null() {
        return Ok(None);
    }
    let raw = value.to_string();
    CURRENCY_NOISE
        .replace_all(&raw, "")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| SkipReason::Unparseable { value: raw })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NegativeValues {
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericProfile {
    pub summary: Describe,
    pub coercion: Coercion,
    /// Present only for columns expected to be non-negative.
    pub negative: Option<NegativeValues>,
    pub zero_count: usize,
    pub zero_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericReport {
    pub columns: Vec<ColumnOutcome<NumericProfile>>,
}

/// Describes numeric-like columns and counts negative and zero values.
pub struct NumericCheck {
    keywords: RoleKeywords,
}

impl NumericCheck {
    pub fn new(keywords: RoleKeywords) -> Self {
        Self { keywords }
    }

    fn analyze(&self, column: &Column, row_count: usize) -> Result<NumericProfile, SkipReason> {
        let (values, coercion) = coerce_numeric(column)?;
        let values: Vec<f64> = values.into_iter().flatten().collect();
        let summary = Describe::from_values(&values).ok_or(SkipReason::NoValues)?;

        let negative = self.keywords.expects_non_negative(&column.name).then(|| {
            let count = values.iter().filter(|v| **v < 0.0).count();
            NegativeValues {
                count,
                percent: percent(count, row_count),
            }
        });
        let zero_count = values.iter().filter(|v| **v == 0.0).count();

        Ok(NumericProfile {
            summary,
            coercion,
            negative,
            zero_count,
            zero_percent: percent(zero_count, row_count),
        })
    }
}

impl Default for NumericCheck {
    fn default() -> Self {
        Self::new(RoleKeywords::default())
    }
}

impl Check for NumericCheck {
    type Report = NumericReport;

    fn run(&self, table: &Table, hints: &RoleHints) -> NumericReport {
        let columns = hints
            .columns_with(Role::Numeric)
            .filter_map(|name| table.column(name))
            .map(|column| {
                ColumnOutcome::from_result(&column.name, self.analyze(column, table.row_count()))
            })
            .collect();
        NumericReport { columns }
    }
}

impl Findings for NumericReport {
    fn findings(&self) -> Vec<Finding> {
        if self.columns.is_empty() {
            return vec![Finding::info(
                CheckCategory::Numeric,
                "No numeric-like columns found",
            )];
        }

        let mut findings = Vec::new();
        for outcome in &self.columns {
            let (column, profile) = match outcome {
                ColumnOutcome::Analyzed { column, report } => (column, report),
                ColumnOutcome::Skipped { column, reason } => {
                    findings.push(skipped_column(
                        CheckCategory::Numeric,
                        "numeric values",
                        column,
                        reason,
                    ));
                    continue;
                }
            };

            let s = &profile.summary;
            let std = s.std.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v));
            findings.push(
                Finding::info(CheckCategory::Numeric, format!("Statistics for '{}'", column))
                    .for_column(column)
                    .with_details(vec![
                        format!("count: {}", s.count),
                        format!("mean: {:.2}", s.mean),
                        format!("std: {}", std),
                        format!("min: {:.2}", s.min),
                        format!("25%: {:.2}", s.q1),
                        format!("50%: {:.2}", s.median),
                        format!("75%: {:.2}", s.q3),
                        format!("max: {:.2}", s.max),
                    ])
                    .with_metrics(
                        Metrics::new()
                            .with_count(s.count)
                            .with_bounds(s.min, s.max)
                            .with_detail(serde_json::json!(s)),
                    ),
            );

            if let Some(neg) = &profile.negative {
                let message = format!(
                    "'{}' has {} negative values ({:.2}%)",
                    column, neg.count, neg.percent
                );
                let finding = if neg.count > 0 {
                    Finding::warning(CheckCategory::Numeric, message)
                } else {
                    Finding::info(CheckCategory::Numeric, message)
                };
                findings.push(
                    finding.for_column(column).with_metrics(
                        Metrics::new()
                            .with_count(neg.count)
                            .with_percentage(neg.percent),
                    ),
                );
            }

            findings.push(
                Finding::info(
                    CheckCategory::Numeric,
                    format!(
                        "'{}' has {} zero values ({:.2}%)",
                        column, profile.zero_count, profile.zero_percent
                    ),
                )
                .for_column(column)
                .with_metrics(
                    Metrics::new()
                        .with_count(profile.zero_count)
                        .with_percentage(profile.zero_percent),
                ),
            );
        }
        findings
    }
}
