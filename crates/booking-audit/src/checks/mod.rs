//! The independent data-quality checks.
//!
//! Every check reads the shared [`Table`] (and, where relevant, the role
//! hints) and returns its own report type. Checks never mutate the table and
//! never fail as a whole: a column they cannot handle becomes a
//! [`ColumnOutcome::Skipped`](crate::findings::ColumnOutcome) entry.

mod categorical;
mod consistency;
mod dates;
mod dtypes;
mod duplicates;
mod missing;
mod numeric;
mod outliers;
mod summary;

pub use categorical::{
    CategoricalCheck, CategoricalProfile, CategoricalReport, VariantGroup, normalize_label,
};
pub use consistency::{
    ConsistencyCheck, ConsistencyReport, CostDiscrepancy, PackagesCostResult, RuleOutcome,
    TotalCostResult, calculated_total,
};
pub use dates::{DateRangeCheck, DateRangeReport, DateRangeStats};
pub use dtypes::{ColumnTypeInfo, SchemaCheck, SchemaReport, TypeMismatch};
pub use duplicates::{DuplicateCheck, DuplicateReport, IdentifierDuplicates};
pub use missing::{ColumnMissing, MissingReport, MissingValuesCheck};
pub use numeric::{
    Coercion, NegativeValues, NumericCheck, NumericProfile, NumericReport, coerce_numeric,
};
pub use outliers::{OutlierBounds, OutlierCheck, OutlierReport, OutlierStats};
pub use summary::{SummaryIssue, SummaryReport};

use crate::findings::Findings;
use crate::roles::RoleHints;
use crate::schema::Table;

/// A single analysis over the table.
pub trait Check {
    /// What the check reports.
    type Report: Findings;

    /// Run the check. Never mutates the table.
    fn run(&self, table: &Table, hints: &RoleHints) -> Self::Report;
}
