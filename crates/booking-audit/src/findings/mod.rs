//! Findings: the unit of report output, and per-column check outcomes.

mod finding;
mod outcome;

pub use finding::{CheckCategory, Finding, FindingKind, Metrics};
pub use outcome::{ColumnOutcome, SkipReason};

/// Anything that can be flattened into report findings.
pub trait Findings {
    /// Produce the findings for this part of the report, in display order.
    fn findings(&self) -> Vec<Finding>;
}

/// Standard message for a skipped column.
pub(crate) fn skipped_column(
    category: CheckCategory,
    what: &str,
    column: &str,
    reason: &SkipReason,
) -> Finding {
    Finding::skipped(
        category,
        format!("Could not analyze {} for '{}': {}", what, column, reason),
    )
    .for_column(column)
}
