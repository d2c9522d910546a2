//! Main Auditor struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::checks::{
    CategoricalCheck, CategoricalReport, Check, ConsistencyCheck, ConsistencyReport,
    DateRangeCheck, DateRangeReport, DuplicateCheck, DuplicateReport, MissingReport,
    MissingValuesCheck, NumericCheck, NumericReport, OutlierCheck, OutlierReport, SchemaCheck,
    SchemaReport, SummaryReport,
};
use crate::config::AuditConfig;
use crate::error::Result;
use crate::findings::{CheckCategory, Finding, Findings, Metrics};
use crate::input::{Parser, SourceMetadata};
use crate::roles::{RoleHints, classify_with};
use crate::schema::Table;

/// Basic dataset information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overview {
    pub row_count: usize,
    pub column_count: usize,
    /// Present when the table was loaded from a file.
    pub source: Option<SourceMetadata>,
}

impl Findings for Overview {
    fn findings(&self) -> Vec<Finding> {
        let mut findings = vec![
            Finding::info(
                CheckCategory::Overview,
                format!(
                    "Dataset shape: {} rows, {} columns",
                    self.row_count, self.column_count
                ),
            )
            .with_metrics(Metrics::new().with_count(self.row_count)),
        ];
        if let Some(source) = &self.source {
            findings.push(
                Finding::info(CheckCategory::Overview, format!("Source: {}", source.file))
                    .with_details(vec![
                        format!("Format: {}", source.format),
                        format!("Size: {} bytes", source.size_bytes),
                        format!("Hash: {}", source.hash),
                    ]),
            );
        }
        findings
    }
}

/// Result of auditing one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub overview: Overview,
    pub roles: RoleHints,
    pub schema: SchemaReport,
    pub missing: MissingReport,
    pub duplicates: DuplicateReport,
    pub outliers: OutlierReport,
    pub categorical: CategoricalReport,
    pub dates: DateRangeReport,
    pub numeric: NumericReport,
    pub consistency: ConsistencyReport,
    pub summary: SummaryReport,
}

impl AuditReport {
    /// Findings of every section, in report order.
    pub fn findings(&self) -> Vec<Finding> {
        let sections: [&dyn Findings; 10] = [
            &self.overview,
            &self.schema,
            &self.missing,
            &self.duplicates,
            &self.outliers,
            &self.categorical,
            &self.dates,
            &self.numeric,
            &self.consistency,
            &self.summary,
        ];
        sections.iter().flat_map(|s| s.findings()).collect()
    }

    /// Findings of a single section.
    pub fn findings_for(&self, category: CheckCategory) -> Vec<Finding> {
        match category {
            CheckCategory::Overview => self.overview.findings(),
            CheckCategory::Schema => self.schema.findings(),
            CheckCategory::Missing => self.missing.findings(),
            CheckCategory::Duplicates => self.duplicates.findings(),
            CheckCategory::Outliers => self.outliers.findings(),
            CheckCategory::Categorical => self.categorical.findings(),
            CheckCategory::DateRange => self.dates.findings(),
            CheckCategory::Numeric => self.numeric.findings(),
            CheckCategory::Consistency => self.consistency.findings(),
            CheckCategory::Summary => self.summary.findings(),
        }
    }

    /// Number of warning findings across the report.
    pub fn warning_count(&self) -> usize {
        self.findings().iter().filter(|f| f.is_warning()).count()
    }
}

/// The main audit engine.
pub struct Auditor {
    config: AuditConfig,
    parser: Parser,
}

impl Auditor {
    /// Create an auditor with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AuditConfig::default())
    }

    /// Create an auditor with a custom configuration.
    pub fn with_config(config: AuditConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Load a delimited file and audit it.
    ///
    /// Loader failures abort before any check runs.
    pub fn audit_file(&self, path: impl AsRef<Path>) -> Result<AuditReport> {
        let (table, source) = self.parser.load_file(path)?;
        Ok(self.audit_table(&table, Some(source)))
    }

    /// Audit an already loaded table.
    pub fn audit_table(&self, table: &Table, source: Option<SourceMetadata>) -> AuditReport {
        let config = &self.config;
        let t = &config.thresholds;
        let hints = classify_with(table.column_names(), &config.keywords);
        debug!(columns = hints.len(), "classified column roles");

        let schema = run_check("schema", &SchemaCheck, table, &hints);
        let missing = run_check(
            "missing",
            &MissingValuesCheck::new(t.critical_missing_percent),
            table,
            &hints,
        );
        let duplicates = run_check(
            "duplicates",
            &DuplicateCheck::new(config.identifier_columns.clone()),
            table,
            &hints,
        );
        let outliers = run_check(
            "outliers",
            &OutlierCheck::new(
                config.outlier_columns.clone(),
                t.iqr_multiplier,
                t.outlier_sample_limit,
                t.outlier_sample_size,
            ),
            table,
            &hints,
        );
        let categorical = run_check(
            "categorical",
            &CategoricalCheck::new(t.max_categories),
            table,
            &hints,
        );
        let dates = run_check(
            "dates",
            &DateRangeCheck::new(config.reference_time(), t.min_plausible_year),
            table,
            &hints,
        );
        let numeric = run_check(
            "numeric",
            &NumericCheck::new(config.keywords.clone()),
            table,
            &hints,
        );
        let consistency = run_check(
            "consistency",
            &ConsistencyCheck::new(t.cost_tolerance),
            table,
            &hints,
        );
        let summary =
            SummaryReport::from_reports(&missing, &duplicates, config.primary_identifier());

        let report = AuditReport {
            overview: Overview {
                row_count: table.row_count(),
                column_count: table.column_count(),
                source,
            },
            roles: hints,
            schema,
            missing,
            duplicates,
            outliers,
            categorical,
            dates,
            numeric,
            consistency,
            summary,
        };
        info!(
            rows = table.row_count(),
            warnings = report.warning_count(),
            "audit complete"
        );
        report
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new()
    }
}

fn run_check<C: Check>(name: &str, check: &C, table: &Table, hints: &RoleHints) -> C::Report {
    debug!(check = name, "running check");
    let report = check.run(table, hints);
    debug!(check = name, "check finished");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::FindingKind;

    fn table(csv: &str) -> Table {
        Parser::new().load_str(csv).unwrap()
    }

    #[test]
    fn test_every_section_reports() {
        let auditor = Auditor::new();
        let report = auditor.audit_table(&table("Name\nx\n"), None);
        for category in CheckCategory::ALL {
            assert!(
                !report.findings_for(category).is_empty(),
                "{:?} produced no findings",
                category
            );
        }
    }

    #[test]
    fn test_findings_in_report_order() {
        let auditor = Auditor::new();
        let report = auditor.audit_table(&table("Booking ID,Party Size\nB1,2\nB1,2\n"), None);
        let findings = report.findings();
        assert_eq!(findings[0].category, CheckCategory::Overview);
        assert_eq!(findings.last().unwrap().category, CheckCategory::Summary);
        let mut last = CheckCategory::Overview;
        for f in &findings {
            assert!(f.category >= last);
            last = f.category;
        }
    }

    #[test]
    fn test_empty_table() {
        let report = Auditor::new().audit_table(&table("Booking ID,Total Cost\n"), None);
        assert_eq!(report.overview.row_count, 0);
        assert_eq!(report.missing.overall_percent, 0.0);
        assert_eq!(report.duplicates.duplicate_percent, 0.0);
        assert!(
            report
                .findings()
                .iter()
                .any(|f| f.kind == FindingKind::Skipped)
        );
    }

    #[test]
    fn test_report_serializes() {
        let report = Auditor::new().audit_table(&table("Status\na\nA\n"), None);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("categorical").is_some());
        assert!(json.get("summary").is_some());
    }
}
