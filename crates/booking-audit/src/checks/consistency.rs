//! Cross-field rules between booking cost columns.

use serde::{Deserialize, Serialize};

use super::Check;
use super::numeric::coerce_numeric;
use crate::findings::{CheckCategory, Finding, Findings, Metrics, SkipReason};
use crate::roles::RoleHints;
use crate::schema::{Column, Table};

pub const PACKAGES: &str = "Packages";
pub const PACKAGES_COST: &str = "Packages Cost";
pub const TOTAL_COST: &str = "Total Cost";
pub const RESERVATION_COST: &str = "Reservation Cost";
pub const ADD_ONS_COST: &str = "Add Ons Cost";
pub const PROMO_CODE_DISCOUNT: &str = "Promo Code Discount";

/// Total implied by the component costs.
pub fn calculated_total(reservation: f64, packages: f64, add_ons: f64, promo: Option<f64>) -> f64 {
    reservation + packages + add_ons - promo.unwrap_or(0.0)
}

/// Result of one cross-field rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RuleOutcome<T> {
    /// Required columns are absent.
    NotApplicable { missing: Vec<String> },
    /// A required column could not be read as numbers.
    Skipped { column: String, reason: SkipReason },
    Evaluated { result: T },
}

impl<T> RuleOutcome<T> {
    pub fn result(&self) -> Option<&T> {
        match self {
            RuleOutcome::Evaluated { result } => Some(result),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagesCostResult {
    pub rows_with_packages: usize,
    /// Rows with a package whose package cost is exactly zero.
    pub zero_cost_count: usize,
}

/// A row whose stated total disagrees with its components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDiscrepancy {
    pub row: usize,
    pub stated: f64,
    pub calculated: f64,
    pub difference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalCostResult {
    /// Rows where every operand was present.
    pub compared_rows: usize,
    pub inconsistent_count: usize,
    /// Mean absolute difference over the inconsistent rows.
    pub mean_discrepancy: Option<f64>,
    pub promo_applied: bool,
    pub discrepancies: Vec<CostDiscrepancy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub tolerance: f64,
    pub packages_cost: RuleOutcome<PackagesCostResult>,
    pub total_cost: RuleOutcome<TotalCostResult>,
}

/// Checks package costs and the total-cost identity.
pub struct ConsistencyCheck {
    tolerance: f64,
}

impl ConsistencyCheck {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    fn packages_cost(&self, table: &Table) -> RuleOutcome<PackagesCostResult> {
        let (packages, cost) = match (
            table.find_column(PACKAGES),
            table.find_column(PACKAGES_COST),
        ) {
            (Some(p), Some(c)) => (p, c),
            (p, c) => {
                return not_applicable(&[(PACKAGES, p.is_some()), (PACKAGES_COST, c.is_some())]);
            }
        };
        let costs = match numbers(cost) {
            Ok(costs) => costs,
            Err(skipped) => return skipped,
        };

        let mut rows_with_packages = 0;
        let mut zero_cost_count = 0;
        for (value, cost) in packages.values.iter().zip(&costs) {
            if value.is_null() || value.to_string().trim().is_empty() {
                continue;
            }
            rows_with_packages += 1;
            if *cost == Some(0.0) {
                zero_cost_count += 1;
            }
        }

        RuleOutcome::Evaluated {
            result: PackagesCostResult {
                rows_with_packages,
                zero_cost_count,
            },
        }
    }

    fn total_cost(&self, table: &Table) -> RuleOutcome<TotalCostResult> {
        let required = [TOTAL_COST, RESERVATION_COST, PACKAGES_COST, ADD_ONS_COST];
        let found: Vec<Option<&Column>> = required.iter().map(|f| table.find_column(f)).collect();
        let columns: Vec<&Column> = found.iter().flatten().copied().collect();
        if columns.len() < required.len() {
            let presence: Vec<(&str, bool)> = required
                .iter()
                .zip(&found)
                .map(|(name, col)| (*name, col.is_some()))
                .collect();
            return not_applicable(&presence);
        }

        let mut operands = Vec::with_capacity(columns.len());
        for column in &columns {
            match numbers(column) {
                Ok(values) => operands.push(values),
                Err(skipped) => return skipped,
            }
        }
        let promo = match table.find_column(PROMO_CODE_DISCOUNT).map(numbers) {
            Some(Ok(values)) => Some(values),
            Some(Err(skipped)) => return skipped,
            None => None,
        };

        let (total, reservation, packages, add_ons) =
            (&operands[0], &operands[1], &operands[2], &operands[3]);
        let mut compared_rows = 0;
        let mut discrepancies = Vec::new();
        for row in 0..table.row_count() {
            let promo_value = match &promo {
                Some(values) => match values[row] {
                    Some(v) => Some(v),
                    None => continue,
                },
                None => None,
            };
            let (Some(stated), Some(r), Some(p), Some(a)) =
                (total[row], reservation[row], packages[row], add_ons[row])
            else {
                continue;
            };

            compared_rows += 1;
            let calculated = calculated_total(r, p, a, promo_value);
            let difference = (stated - calculated).abs();
            if difference > self.tolerance {
                discrepancies.push(CostDiscrepancy {
                    row,
                    stated,
                    calculated,
                    difference,
                });
            }
        }

        let inconsistent_count = discrepancies.len();
        let mean_discrepancy = (inconsistent_count > 0).then(|| {
            discrepancies.iter().map(|d| d.difference).sum::<f64>() / inconsistent_count as f64
        });

        RuleOutcome::Evaluated {
            result: TotalCostResult {
                compared_rows,
                inconsistent_count,
                mean_discrepancy,
                promo_applied: promo.is_some(),
                discrepancies,
            },
        }
    }
}

impl Default for ConsistencyCheck {
    fn default() -> Self {
        Self::new(0.01)
    }
}

fn not_applicable<T>(presence: &[(&str, bool)]) -> RuleOutcome<T> {
    RuleOutcome::NotApplicable {
        missing: presence
            .iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name.to_string())
            .collect(),
    }
}

fn numbers<T>(column: &Column) -> Result<Vec<Option<f64>>, RuleOutcome<T>> {
    coerce_numeric(column)
        .map(|(values, _)| values)
        .map_err(|reason| {
            tracing::warn!(column = %column.name, %reason, "cost column skipped");
            RuleOutcome::Skipped {
                column: column.name.clone(),
                reason,
            }
        })
}

impl Check for ConsistencyCheck {
    type Report = ConsistencyReport;

    fn run(&self, table: &Table, _hints: &RoleHints) -> ConsistencyReport {
        ConsistencyReport {
            tolerance: self.tolerance,
            packages_cost: self.packages_cost(table),
            total_cost: self.total_cost(table),
        }
    }
}

fn rule_not_evaluated<T>(rule: &str, outcome: &RuleOutcome<T>) -> Option<Finding> {
    match outcome {
        RuleOutcome::NotApplicable { missing } => Some(
            Finding::info(
                CheckCategory::Consistency,
                format!("{} check not applicable: missing {}", rule, missing.join(", ")),
            ),
        ),
        RuleOutcome::Skipped { column, reason } => Some(
            Finding::skipped(
                CheckCategory::Consistency,
                format!("Could not check {} using '{}': {}", rule, column, reason),
            )
            .for_column(column),
        ),
        RuleOutcome::Evaluated { .. } => None,
    }
}

impl Findings for ConsistencyReport {
    fn findings(&self) -> Vec<Finding> {
        let mut findings = Vec::new();

        match &self.packages_cost {
            RuleOutcome::Evaluated { result } => {
                let message = format!(
                    "Bookings with packages but zero package cost: {}",
                    result.zero_cost_count
                );
                let finding = if result.zero_cost_count > 0 {
                    Finding::warning(CheckCategory::Consistency, message)
                } else {
                    Finding::info(CheckCategory::Consistency, message)
                };
                findings.push(
                    finding.with_metrics(Metrics::new().with_count(result.zero_cost_count)),
                );
            }
            other => findings.extend(rule_not_evaluated("package cost", other)),
        }

        match &self.total_cost {
            RuleOutcome::Evaluated { result } => {
                let message = format!(
                    "Bookings with inconsistent total cost: {} of {} compared",
                    result.inconsistent_count, result.compared_rows
                );
                let mut metrics = Metrics::new().with_count(result.inconsistent_count);
                let finding = match result.mean_discrepancy {
                    Some(mean) => {
                        metrics =
                            metrics.with_detail(serde_json::json!({ "mean_discrepancy": mean }));
                        Finding::warning(CheckCategory::Consistency, message)
                            .with_details(vec![format!("Average discrepancy: ${:.2}", mean)])
                    }
                    None => Finding::info(CheckCategory::Consistency, message),
                };
                findings.push(finding.with_metrics(metrics));
            }
            other => findings.extend(rule_not_evaluated("total cost", other)),
        }

        findings
    }
}
