//! Finding types produced by the checks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Report section a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    /// Row and column counts, source details.
    Overview,
    /// Column types and role/type mismatches.
    Schema,
    /// Missing values per column and overall.
    Missing,
    /// Duplicate rows and identifiers.
    Duplicates,
    /// IQR outliers in key numeric columns.
    Outliers,
    /// Case/spacing variants of category labels.
    Categorical,
    /// Date ranges, future and implausibly old dates.
    DateRange,
    /// Descriptive statistics, negative and zero values.
    Numeric,
    /// Cross-field rules between cost columns.
    Consistency,
    /// Roll-up of missing-value and duplicate issues.
    Summary,
}

impl CheckCategory {
    /// Every category, in report order.
    pub const ALL: [CheckCategory; 10] = [
        CheckCategory::Overview,
        CheckCategory::Schema,
        CheckCategory::Missing,
        CheckCategory::Duplicates,
        CheckCategory::Outliers,
        CheckCategory::Categorical,
        CheckCategory::DateRange,
        CheckCategory::Numeric,
        CheckCategory::Consistency,
        CheckCategory::Summary,
    ];

    /// Get a human-readable label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            CheckCategory::Overview => "Basic Dataset Information",
            CheckCategory::Schema => "Data Types Analysis",
            CheckCategory::Missing => "Missing Values Analysis",
            CheckCategory::Duplicates => "Duplicate Records Analysis",
            CheckCategory::Outliers => "Outlier Detection",
            CheckCategory::Categorical => "Value Consistency Checks",
            CheckCategory::DateRange => "Date Range Validation",
            CheckCategory::Numeric => "Numeric Fields Validation",
            CheckCategory::Consistency => "Logical Consistency Checks",
            CheckCategory::Summary => "Data Quality Summary",
        }
    }
}

/// What kind of statement a finding makes. Not a severity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    /// A statistic or a positive result.
    Info,
    /// Something that looks wrong with the data.
    Warning,
    /// A column or rule that could not be analyzed.
    Skipped,
}

/// Numbers backing a finding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Number of affected rows, values or columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Percentage of the relevant whole.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    /// Lower and upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<(f64, f64)>,
    /// Sample offending values.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub samples: Vec<Value>,
    /// Structured detail (distributions, listings, statistics).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl Metrics {
    /// Create empty metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the count.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Set the percentage.
    pub fn with_percentage(mut self, pct: f64) -> Self {
        self.percentage = Some(pct);
        self
    }

    /// Set the bounds.
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.bounds = Some((lower, upper));
        self
    }

    /// Set sample values.
    pub fn with_samples<T: Into<Value>>(mut self, samples: impl IntoIterator<Item = T>) -> Self {
        self.samples = samples.into_iter().map(Into::into).collect();
        self
    }

    /// Set structured detail.
    pub fn with_detail(mut self, detail: impl Into<Value>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// A single reportable observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub category: CheckCategory,
    pub kind: FindingKind,
    /// Affected column, when the finding concerns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Human-readable statement.
    pub message: String,
    /// Supporting lines for listings (one per column, group, statistic).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub details: Vec<String>,
    pub metrics: Metrics,
}

impl Finding {
    /// Create a new finding.
    pub fn new(category: CheckCategory, kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            category,
            kind,
            column: None,
            message: message.into(),
            details: Vec::new(),
            metrics: Metrics::new(),
        }
    }

    pub fn info(category: CheckCategory, message: impl Into<String>) -> Self {
        Self::new(category, FindingKind::Info, message)
    }

    pub fn warning(category: CheckCategory, message: impl Into<String>) -> Self {
        Self::new(category, FindingKind::Warning, message)
    }

    pub fn skipped(category: CheckCategory, message: impl Into<String>) -> Self {
        Self::new(category, FindingKind::Skipped, message)
    }

    /// Attach the affected column.
    pub fn for_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Set the supporting lines.
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// Set the metrics.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn is_warning(&self) -> bool {
        self.kind == FindingKind::Warning
    }
}
