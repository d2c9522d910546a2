//! Column role inference from column names.
//!
//! Roles are advisory: they decide which checks look at a column, never how
//! its values are stored. A name may carry several roles at once ("Updated At
//! Days" is both date-like and numeric-like) or none.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::ColumnType;

/// Name fragments marking a column as date-like.
pub const DATE_KEYWORDS: &[&str] = &["date", "time", "at"];

/// Name fragments marking a column as numeric-like.
pub const NUMERIC_KEYWORDS: &[&str] = &["cost", "charge", "price", "amount", "size", "days"];

/// Name fragments marking a column as boolean-like.
pub const BOOLEAN_KEYWORDS: &[&str] = &[
    "is",
    "was",
    "has",
    "available",
    "completed",
    "selected",
    "required",
    "applied",
];

/// Name fragments for quantities that should never be negative.
///
/// Independent of [`NUMERIC_KEYWORDS`]: "days" columns may go negative.
pub const NON_NEGATIVE_KEYWORDS: &[&str] = &["cost", "price", "amount", "size"];

/// A role a column may play, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Date,
    Numeric,
    Boolean,
}

impl Role {
    /// Whether a column of this type satisfies the role.
    pub fn accepts(&self, column_type: ColumnType) -> bool {
        match self {
            Role::Date => column_type.is_temporal(),
            Role::Numeric => column_type.is_numeric(),
            Role::Boolean => column_type == ColumnType::Boolean,
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Date => "date",
            Role::Numeric => "numeric",
            Role::Boolean => "boolean",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Keyword sets used by the classifier, overridable through configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleKeywords {
    pub date: Vec<String>,
    pub numeric: Vec<String>,
    pub boolean: Vec<String>,
    /// Not a role: selects numeric columns that get the negative-value check.
    pub non_negative: Vec<String>,
}

impl Default for RoleKeywords {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            date: owned(DATE_KEYWORDS),
            numeric: owned(NUMERIC_KEYWORDS),
            boolean: owned(BOOLEAN_KEYWORDS),
            non_negative: owned(NON_NEGATIVE_KEYWORDS),
        }
    }
}

impl RoleKeywords {
    /// Roles suggested by a single column name.
    pub fn roles_for(&self, name: &str) -> BTreeSet<Role> {
        let lower = name.to_lowercase();
        let mut roles = BTreeSet::new();
        if contains_any(&lower, &self.date) {
            roles.insert(Role::Date);
        }
        if contains_any(&lower, &self.numeric) {
            roles.insert(Role::Numeric);
        }
        if contains_any(&lower, &self.boolean) {
            roles.insert(Role::Boolean);
        }
        roles
    }

    /// Whether the name suggests a quantity that should be non-negative.
    pub fn expects_non_negative(&self, name: &str) -> bool {
        contains_any(&name.to_lowercase(), &self.non_negative)
    }
}

fn contains_any(lower_name: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|k| !k.is_empty() && lower_name.contains(&k.to_lowercase()))
}

/// Role classification of every column, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleHints {
    roles: IndexMap<String, BTreeSet<Role>>,
}

impl RoleHints {
    /// Roles of a column; `None` when the column was not classified.
    pub fn roles(&self, column: &str) -> Option<&BTreeSet<Role>> {
        self.roles.get(column)
    }

    pub fn has(&self, column: &str, role: Role) -> bool {
        self.roles.get(column).is_some_and(|r| r.contains(&role))
    }

    /// Columns carrying a role, in table order.
    pub fn columns_with(&self, role: Role) -> impl Iterator<Item = &str> {
        self.roles
            .iter()
            .filter(move |(_, roles)| roles.contains(&role))
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<Role>)> {
        self.roles.iter().map(|(name, roles)| (name.as_str(), roles))
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Classify column names with the default keyword sets.
pub fn classify<I, S>(column_names: I) -> RoleHints
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    classify_with(column_names, &RoleKeywords::default())
}

/// Classify column names with custom keyword sets.
pub fn classify_with<I, S>(column_names: I, keywords: &RoleKeywords) -> RoleHints
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let roles = column_names
        .into_iter()
        .map(|name| {
            let name = name.as_ref();
            (name.to_string(), keywords.roles_for(name))
        })
        .collect();
    RoleHints { roles }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_columns() {
        let hints = classify([
            "Booking ID",
            "Booking Date",
            "Party Size",
            "Total Cost ($)",
            "Is Canceled",
            "Packages",
        ]);

        assert!(hints.has("Booking Date", Role::Date));
        assert!(hints.has("Party Size", Role::Numeric));
        assert!(hints.has("Total Cost ($)", Role::Numeric));
        assert!(hints.has("Is Canceled", Role::Boolean));
        assert!(hints.roles("Booking ID").unwrap().is_empty());
        assert!(hints.roles("Packages").unwrap().is_empty());
    }

    #[test]
    fn test_substring_matches_overlap() {
        // "Status" and "Reservation Days Ahead" both contain "at".
        let hints = classify(["Status", "Reservation Days Ahead", "Search Days Ahead"]);
        assert!(hints.has("Status", Role::Date));
        assert!(!hints.has("Search Days Ahead", Role::Date));
        let roles = hints.roles("Reservation Days Ahead").unwrap();
        assert!(roles.contains(&Role::Date));
        assert!(roles.contains(&Role::Numeric));
    }

    #[test]
    fn test_case_insensitive() {
        let hints = classify(["RESERVATION COST", "is_available"]);
        assert!(hints.has("RESERVATION COST", Role::Numeric));
        assert!(hints.has("is_available", Role::Boolean));
    }

    #[test]
    fn test_columns_with_preserves_order() {
        let hints = classify(["Party Size", "Name", "Total Cost"]);
        let numeric: Vec<&str> = hints.columns_with(Role::Numeric).collect();
        assert_eq!(numeric, vec!["Party Size", "Total Cost"]);
    }

    #[test]
    fn test_custom_keywords() {
        let keywords = RoleKeywords {
            numeric: vec!["fee".to_string()],
            ..RoleKeywords::default()
        };
        let hints = classify_with(["Service Fee", "Party Size"], &keywords);
        assert!(hints.has("Service Fee", Role::Numeric));
        assert!(!hints.has("Party Size", Role::Numeric));
    }

    #[test]
    fn test_non_negative_is_independent_of_roles() {
        let keywords = RoleKeywords::default();
        assert!(keywords.expects_non_negative("Total Cost ($)"));
        assert!(keywords.expects_non_negative("Party Size"));
        assert!(!keywords.expects_non_negative("Search Days Ahead"));
        assert!(!keywords.expects_non_negative("Service Charge"));
    }

    #[test]
    fn test_role_accepts() {
        assert!(Role::Date.accepts(ColumnType::Date));
        assert!(!Role::Date.accepts(ColumnType::Text));
        assert!(Role::Numeric.accepts(ColumnType::Integer));
        assert!(!Role::Boolean.accepts(ColumnType::Integer));
    }
}
