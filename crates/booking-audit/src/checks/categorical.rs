//! Case and whitespace variants of category labels.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Check;
use crate::findings::{CheckCategory, Finding, Findings, Metrics};
use crate::roles::RoleHints;
use crate::schema::{Column, ColumnType, Table};

/// Canonical form of a category label: trimmed and lower-cased.
pub fn normalize_label(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Raw labels that collapse to the same normalised label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantGroup {
    pub normalized: String,
    /// Raw spellings in order of first appearance.
    pub variants: Vec<String>,
}

/// Distribution and variant groups of one categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalProfile {
    pub column: String,
    pub distinct_count: usize,
    /// Value counts, most frequent first; ties keep first appearance.
    pub distribution: IndexMap<String, usize>,
    pub normalized_count: usize,
    /// Groups with more than one raw spelling.
    pub groups: Vec<VariantGroup>,
}

impl CategoricalProfile {
    fn from_column(column: &Column) -> Self {
        let counts = column.text_counts();

        let mut ordered: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (*k, *v)).collect();
        // stable sort keeps first-appearance order among ties
        ordered.sort_by(|a, b| b.1.cmp(&a.1));
        let distribution = ordered
            .into_iter()
            .map(|(value, count)| (value.to_string(), count))
            .collect();

        let mut by_normalized: IndexMap<String, Vec<String>> = IndexMap::new();
        for raw in counts.keys() {
            by_normalized
                .entry(normalize_label(raw))
                .or_default()
                .push(raw.to_string());
        }
        let normalized_count = by_normalized.len();
        let groups = by_normalized
            .into_iter()
            .filter(|(_, variants)| variants.len() > 1)
            .map(|(normalized, variants)| VariantGroup {
                normalized,
                variants,
            })
            .collect();

        Self {
            column: column.name.clone(),
            distinct_count: counts.len(),
            distribution,
            normalized_count,
            groups,
        }
    }

    /// Whether some labels differ only by case or surrounding spaces.
    pub fn has_inconsistencies(&self) -> bool {
        self.normalized_count < self.distinct_count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalReport {
    pub max_categories: usize,
    pub columns: Vec<CategoricalProfile>,
}

/// Profiles low-cardinality text columns.
pub struct CategoricalCheck {
    max_categories: usize,
}

impl CategoricalCheck {
    pub fn new(max_categories: usize) -> Self {
        Self { max_categories }
    }
}

impl Default for CategoricalCheck {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Check for CategoricalCheck {
    type Report = CategoricalReport;

    fn run(&self, table: &Table, _hints: &RoleHints) -> CategoricalReport {
        let columns = table
            .columns()
            .iter()
            .filter(|c| c.column_type == ColumnType::Text)
            .filter(|c| {
                let distinct = c.text_counts().len();
                distinct > 1 && distinct < self.max_categories
            })
            .map(CategoricalProfile::from_column)
            .collect();

        CategoricalReport {
            max_categories: self.max_categories,
            columns,
        }
    }
}

impl Findings for CategoricalReport {
    fn findings(&self) -> Vec<Finding> {
        if self.columns.is_empty() {
            return vec![Finding::info(
                CheckCategory::Categorical,
                format!(
                    "No text columns with between 2 and {} distinct values",
                    self.max_categories.saturating_sub(1)
                ),
            )];
        }

        let mut findings = Vec::new();
        for profile in &self.columns {
            findings.push(
                Finding::info(
                    CheckCategory::Categorical,
                    format!(
                        "Value distribution for '{}' ({} distinct values)",
                        profile.column, profile.distinct_count
                    ),
                )
                .for_column(&profile.column)
                .with_details(
                    profile
                        .distribution
                        .iter()
                        .map(|(value, count)| format!("{}: {}", value, count))
                        .collect(),
                )
                .with_metrics(
                    Metrics::new()
                        .with_count(profile.distinct_count)
                        .with_detail(serde_json::json!(profile.distribution)),
                ),
            );

            if profile.has_inconsistencies() {
                findings.push(
                    Finding::warning(
                        CheckCategory::Categorical,
                        format!(
                            "'{}' has {} unique values but only {} after normalization",
                            profile.column, profile.distinct_count, profile.normalized_count
                        ),
                    )
                    .for_column(&profile.column)
                    .with_details(
                        profile
                            .groups
                            .iter()
                            .map(|g| format!("'{}' variants: {:?}", g.normalized, g.variants))
                            .collect(),
                    )
                    .with_metrics(Metrics::new().with_count(profile.groups.len())),
                );
            }
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;

    fn run(csv: &str) -> CategoricalReport {
        let table = Parser::new().load_str(csv).unwrap();
        CategoricalCheck::default().run(&table, &RoleHints::default())
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Active "), "active");
        assert_eq!(normalize_label(&normalize_label(" MiXed ")), normalize_label(" MiXed "));
    }

    #[test]
    fn test_status_variants() {
        let report = run(
            "Status\nactive\nActive\nACTIVE\n active\nactive \ncancelled\nCancelled\nactive\n",
        );
        let profile = &report.columns[0];
        assert_eq!(profile.distinct_count, 7);
        assert_eq!(profile.normalized_count, 2);
        assert!(profile.has_inconsistencies());
        assert_eq!(profile.groups.len(), 2);
        assert_eq!(profile.groups[0].normalized, "active");
        assert_eq!(profile.groups[0].variants.len(), 5);
        assert_eq!(profile.groups[0].variants[0], "active");

        let findings = report.findings();
        assert!(findings.iter().any(|f| f.is_warning()));
    }

    #[test]
    fn test_distribution_order() {
        let report = run("Channel\nweb\napp\napp\nphone\nweb\n");
        let order: Vec<&str> = report.columns[0]
            .distribution
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(order, vec!["web", "app", "phone"]);
        assert!(!report.columns[0].has_inconsistencies());
    }

    #[test]
    fn test_cardinality_window() {
        let mut csv = String::from("Single,Many\n");
        for i in 0..25 {
            csv.push_str(&format!("same,v{}\n", i));
        }
        let report = run(&csv);
        assert!(report.columns.is_empty());
        assert_eq!(report.findings().len(), 1);
    }

    #[test]
    fn test_numeric_columns_ignored() {
        let report = run("Party Size\n1\n2\n");
        assert!(report.columns.is_empty());
    }
}
