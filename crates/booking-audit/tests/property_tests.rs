//! Property-based tests for the audit checks.
//!
//! These tests use proptest to generate random tables and verify that the
//! checks keep their invariants for any input.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p booking-audit --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p booking-audit --test property_tests
//! ```

use proptest::prelude::*;

use booking_audit::checks::{
    Check, DuplicateCheck, MissingValuesCheck, OutlierBounds, calculated_total, normalize_label,
};
use booking_audit::{Auditor, Parser, RoleHints, Table, classify};

// =============================================================================
// Test Strategies
// =============================================================================

/// A cell: a small value, an empty cell or an NA spelling.
fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-c]{1,2}",
        3 => "-?[0-9]{1,3}",
        1 => Just(String::new()),
        1 => Just("NA".to_string()),
    ]
}

/// Rows of a three-column table.
fn rows() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(cell(), 3), 0..40)
}

fn to_csv(rows: &[Vec<String>]) -> String {
    let mut csv = String::from("Booking ID,Party Size,Status\n");
    for row in rows {
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

fn load(rows: &[Vec<String>]) -> Table {
    Parser::new().load_str(&to_csv(rows)).expect("generated CSV parses")
}

// =============================================================================
// Missing values
// =============================================================================

proptest! {
    #[test]
    fn missing_counts_add_up(rows in rows()) {
        let table = load(&rows);
        let report = MissingValuesCheck::default().run(&table, &RoleHints::default());

        for col in &report.columns {
            prop_assert_eq!(col.missing_count + col.non_missing_count, table.row_count());
            prop_assert!((0.0..=100.0).contains(&col.missing_percent));
        }
        let sum: usize = report.columns.iter().map(|c| c.missing_count).sum();
        prop_assert_eq!(report.total_missing, sum);
        prop_assert_eq!(report.total_cells, table.row_count() * table.column_count());
    }
}

// =============================================================================
// Duplicates
// =============================================================================

proptest! {
    #[test]
    fn duplicate_rows_invariant_under_permutation(
        rows in rows(),
        seed in any::<u64>(),
    ) {
        let check = DuplicateCheck::new(vec!["Booking ID".into()]);
        let original = check.run(&load(&rows), &RoleHints::default());

        let mut shuffled = rows.clone();
        // deterministic Fisher-Yates driven by the seed
        let mut state = seed;
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state >> 33) as usize % (i + 1);
            shuffled.swap(i, j);
        }
        let permuted = check.run(&load(&shuffled), &RoleHints::default());

        prop_assert_eq!(original.duplicate_rows, permuted.duplicate_rows);
        prop_assert_eq!(
            original.identifier("Booking ID").map(|i| i.duplicate_count),
            permuted.identifier("Booking ID").map(|i| i.duplicate_count)
        );
        prop_assert!(original.duplicate_rows <= rows.len());
    }
}

// =============================================================================
// Outlier bounds
// =============================================================================

proptest! {
    #[test]
    fn bounds_are_ordered(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 1..200),
        multiplier in 0.0f64..5.0,
    ) {
        let b = OutlierBounds::from_values(&values, multiplier).unwrap();
        prop_assert!(b.lower <= b.q1);
        prop_assert!(b.q1 <= b.q3);
        prop_assert!(b.q3 <= b.upper);
        prop_assert!(b.iqr >= 0.0);
    }

    #[test]
    fn values_within_quartiles_are_never_outliers(
        values in prop::collection::vec(-1.0e3f64..1.0e3, 1..100),
    ) {
        let b = OutlierBounds::from_values(&values, 1.5).unwrap();
        for v in values.iter().filter(|v| **v >= b.q1 && **v <= b.q3) {
            prop_assert!(!b.is_outlier(*v));
        }
    }
}

// =============================================================================
// Categorical normalisation and cost arithmetic
// =============================================================================

proptest! {
    #[test]
    fn normalization_is_idempotent(label in "\\PC{0,30}") {
        let once = normalize_label(&label);
        prop_assert_eq!(normalize_label(&once), once);
    }

    #[test]
    fn promo_reduces_calculated_total(
        reservation in 0.0f64..1.0e4,
        packages in 0.0f64..1.0e3,
        add_ons in 0.0f64..1.0e3,
        promo in 0.0f64..1.0e3,
    ) {
        let without = calculated_total(reservation, packages, add_ons, None);
        let with = calculated_total(reservation, packages, add_ons, Some(promo));
        prop_assert!((without - with - promo).abs() < 1e-6);
    }
}

// =============================================================================
// Whole audit
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn audit_never_panics_and_reports_every_section(rows in rows()) {
        let table = load(&rows);
        let report = Auditor::new().audit_table(&table, None);
        prop_assert_eq!(report.overview.row_count, rows.len());
        prop_assert!(!report.findings().is_empty());

        let hints = classify(table.column_names());
        prop_assert_eq!(hints.len(), 3);
    }
}
