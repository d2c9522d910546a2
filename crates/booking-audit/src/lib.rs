//! Booking audit: a descriptive data-quality auditor for booking records.
//!
//! The auditor loads one delimited file into a typed [`Table`], classifies
//! columns by name into roles, and runs a set of independent checks over it:
//! schema, missing values, duplicates, IQR outliers, categorical
//! consistency, date ranges, numeric fields and cost consistency. The result
//! is an [`AuditReport`] that can be serialized or flattened into
//! [`Finding`]s for display.
//!
//! # Core Principles
//!
//! - **Descriptive**: findings state what was observed; nothing is scored
//! - **Non-destructive**: checks read the table and never modify it
//! - **Explicit skips**: a column a check cannot handle is reported, not hidden
//!
//! # Example
//!
//! ```no_run
//! use booking_audit::Auditor;
//!
//! let auditor = Auditor::new();
//! let report = auditor.audit_file("bookings.csv").unwrap();
//!
//! println!("Rows: {}", report.overview.row_count);
//! for finding in report.findings() {
//!     println!("{}", finding.message);
//! }
//! ```

pub mod checks;
pub mod config;
pub mod error;
pub mod findings;
pub mod input;
pub mod roles;
pub mod schema;
pub mod stats;

mod audit;

pub use crate::audit::{AuditReport, Auditor, Overview};
pub use config::{AuditConfig, Thresholds};
pub use error::{AuditError, Result};
pub use findings::{CheckCategory, ColumnOutcome, Finding, FindingKind, SkipReason};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use roles::{Role, RoleHints, RoleKeywords, classify};
pub use schema::{Column, ColumnType, Table, Value};
