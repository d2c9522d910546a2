//! Text rendering of an audit report.

use std::fmt::Write;

use booking_audit::{AuditReport, CheckCategory, Finding, FindingKind};
use colored::Colorize;

const RULE_WIDTH: usize = 60;

/// Render the whole report as numbered sections.
pub fn render_report(report: &AuditReport) -> String {
    let mut out = String::new();
    for (index, category) in CheckCategory::ALL.iter().enumerate() {
        render_section(
            &mut out,
            index + 1,
            *category,
            &report.findings_for(*category),
        );
    }

    let warnings = report.warning_count();
    let _ = writeln!(
        out,
        "Audit finished with {} warnings",
        if warnings > 0 {
            warnings.to_string().yellow().bold()
        } else {
            warnings.to_string().green().bold()
        }
    );
    out
}

fn render_section(out: &mut String, number: usize, category: CheckCategory, findings: &[Finding]) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{}", rule.cyan());
    let _ = writeln!(
        out,
        "{}",
        format!("{}. {}", number, category.label().to_uppercase()).cyan().bold()
    );
    let _ = writeln!(out, "{}", rule.cyan());
    for finding in findings {
        render_finding(out, finding);
    }
    let _ = writeln!(out);
}

fn render_finding(out: &mut String, finding: &Finding) {
    let line = match finding.kind {
        FindingKind::Info => format!("- {}", finding.message),
        FindingKind::Warning => format!("{} {}", "WARNING:".yellow().bold(), finding.message),
        FindingKind::Skipped => format!("- {}", finding.message).dimmed().to_string(),
    };
    let _ = writeln!(out, "{}", line);
    for detail in &finding.details {
        let _ = writeln!(out, "    {}", detail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_audit::{Auditor, Parser};

    fn report(csv: &str) -> AuditReport {
        let table = Parser::new().load_str(csv).unwrap();
        Auditor::new().audit_table(&table, None)
    }

    #[test]
    fn test_sections_are_numbered() {
        colored::control::set_override(false);
        let text = render_report(&report("Booking ID\nB1\n"));
        assert!(text.contains("1. BASIC DATASET INFORMATION"));
        assert!(text.contains("6. VALUE CONSISTENCY CHECKS"));
        assert!(text.contains("10. DATA QUALITY SUMMARY"));
        assert!(text.contains("No significant data quality issues were identified."));
    }

    #[test]
    fn test_warnings_are_marked() {
        colored::control::set_override(false);
        let text = render_report(&report("Booking ID\nB1\nB1\n"));
        assert!(text.contains("WARNING: Complete duplicate rows: 1 (50.00%)"));
        assert!(text.contains("WARNING: 1 duplicate Booking IDs"));
    }
}
