//! Column types and role/type mismatches.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Check;
use crate::findings::{CheckCategory, Finding, Findings, Metrics};
use crate::roles::{Role, RoleHints};
use crate::schema::{ColumnType, Table};

/// Type and roles of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTypeInfo {
    pub column: String,
    pub column_type: ColumnType,
    pub roles: BTreeSet<Role>,
}

/// A column whose name suggests a role its stored type does not satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeMismatch {
    pub column: String,
    pub role: Role,
    pub actual: ColumnType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaReport {
    pub columns: Vec<ColumnTypeInfo>,
    pub mismatches: Vec<TypeMismatch>,
}

/// Lists column types and flags role/type mismatches.
pub struct SchemaCheck;

impl Check for SchemaCheck {
    type Report = SchemaReport;

    fn run(&self, table: &Table, hints: &RoleHints) -> SchemaReport {
        let mut columns = Vec::with_capacity(table.column_count());
        let mut mismatches = Vec::new();

        for column in table.columns() {
            let roles = hints.roles(&column.name).cloned().unwrap_or_default();
            for role in &roles {
                if !role.accepts(column.column_type) {
                    mismatches.push(TypeMismatch {
                        column: column.name.clone(),
                        role: *role,
                        actual: column.column_type,
                    });
                }
            }
            columns.push(ColumnTypeInfo {
                column: column.name.clone(),
                column_type: column.column_type,
                roles,
            });
        }

        SchemaReport {
            columns,
            mismatches,
        }
    }
}

impl Findings for SchemaReport {
    fn findings(&self) -> Vec<Finding> {
        let listing: serde_json::Map<String, serde_json::Value> = self
            .columns
            .iter()
            .map(|c| (c.column.clone(), json!(c.column_type)))
            .collect();

        let mut findings = vec![
            Finding::info(CheckCategory::Schema, "Column data types")
                .with_details(
                    self.columns
                        .iter()
                        .map(|c| format!("{}: {}", c.column, c.column_type))
                        .collect(),
                )
                .with_metrics(
                    Metrics::new()
                        .with_count(self.columns.len())
                        .with_detail(listing),
                ),
        ];

        if self.mismatches.is_empty() {
            findings.push(Finding::info(
                CheckCategory::Schema,
                "No potential data type issues",
            ));
        }

        for m in &self.mismatches {
            let expected = match m.role {
                Role::Date => "a date",
                Role::Numeric => "numeric",
                Role::Boolean => "boolean",
            };
            findings.push(
                Finding::warning(
                    CheckCategory::Schema,
                    format!(
                        "'{}' might be {} but is stored as {}",
                        m.column, expected, m.actual
                    ),
                )
                .for_column(&m.column),
            );
        }

        findings
    }
}
