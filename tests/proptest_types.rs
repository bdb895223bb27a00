//! Property-based tests for record identity and the diff engine.

use feed_analyzer::{DiffEngine, FeedIndex, Record, Schema};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// Strategies
// ============================================================================

/// Field values free of delimiters, quotes and line breaks.
fn field_value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .-]{0,10}"
}

/// Lowercase keys, so distinct strings never collide after normalization.
fn key_set() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::collection::btree_set("[a-z0-9]{1,6}", 0..20)
}

fn name_map() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map("[a-z0-9]{1,6}", field_value(), 0..20)
}

fn facility_index(keys: &BTreeSet<String>) -> FeedIndex {
    let records = keys
        .iter()
        .map(|key| Record::from_fields(Schema::Facility, [key.as_str(), "v1"]).unwrap());
    FeedIndex::from_records(Schema::Facility, "generated", records).unwrap()
}

fn vendor_index(names: &BTreeMap<String, String>) -> FeedIndex {
    let records = names.iter().map(|(key, name)| {
        let mut values = vec![String::new(); Schema::Vendor.arity()];
        values[0] = key.clone();
        values[1] = name.clone();
        Record::new(Schema::Vendor, values).unwrap()
    });
    FeedIndex::from_records(Schema::Vendor, "generated", records).unwrap()
}

fn sorted_keys<'a>(iter: impl Iterator<Item = &'a Record>) -> Vec<String> {
    let mut keys: Vec<String> = iter.map(|r| r.identity_hash().to_string()).collect();
    keys.sort();
    keys
}

// ============================================================================
// Identity
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Case never affects identity.
    #[test]
    fn identity_ignores_case(facility in "[A-Za-z0-9]{1,8}", vendor in "[A-Za-z0-9]{1,8}") {
        let upper = Record::from_fields(
            Schema::Facility,
            [facility.to_uppercase(), vendor.to_uppercase()],
        ).unwrap();
        let lower = Record::from_fields(
            Schema::Facility,
            [facility.to_lowercase(), vendor.to_lowercase()],
        ).unwrap();
        let mixed = Record::from_fields(Schema::Facility, [facility.clone(), vendor.clone()]).unwrap();

        prop_assert_eq!(upper.identity_hash(), lower.identity_hash());
        prop_assert_eq!(mixed.identity_hash(), lower.identity_hash());
        prop_assert_eq!(
            lower.identity_hash(),
            format!("{facility}{vendor}").to_lowercase()
        );
    }

    /// Fields outside the identity set never change it.
    #[test]
    fn identity_ignores_non_identity_fields(key in "[a-z0-9]{1,6}", a in field_value(), b in field_value()) {
        let mut left = vec![String::new(); Schema::Vendor.arity()];
        left[0] = key.clone();
        left[1] = a;
        let mut right = left.clone();
        right[1] = b;

        let left = Record::new(Schema::Vendor, left).unwrap();
        let right = Record::new(Schema::Vendor, right).unwrap();
        prop_assert_eq!(left.identity_hash(), right.identity_hash());
    }
}

// ============================================================================
// Diff engine
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Additions are exactly right-only keys, deletions exactly left-only keys.
    #[test]
    fn row_changes_are_complete(left in key_set(), right in key_set()) {
        let left_index = facility_index(&left);
        let right_index = facility_index(&right);
        let result = DiffEngine::new().compare(&left_index, &right_index).unwrap();

        let expected = |from: &BTreeSet<String>, minus: &BTreeSet<String>| {
            let mut keys: Vec<String> = from.difference(minus).map(|k| format!("{k}v1")).collect();
            keys.sort();
            keys
        };
        let expected_adds = expected(&right, &left);
        let expected_dels = expected(&left, &right);

        prop_assert_eq!(sorted_keys(result.additions()), expected_adds);
        prop_assert_eq!(sorted_keys(result.deletions()), expected_dels);
        prop_assert_eq!(result.column_changes().count(), 0);
    }

    /// A column change is reported exactly where a shared key's value differs.
    #[test]
    fn column_changes_are_sound(left in name_map(), right in name_map()) {
        let left_index = vendor_index(&left);
        let right_index = vendor_index(&right);
        let result = DiffEngine::new().compare(&left_index, &right_index).unwrap();

        let mut reported: Vec<(String, String, String)> = result
            .column_changes()
            .map(|c| {
                (
                    c.identity_hash().to_string(),
                    c.left_value().to_string(),
                    c.right_value().to_string(),
                )
            })
            .collect();
        reported.sort();

        let expected: Vec<(String, String, String)> = left
            .iter()
            .filter_map(|(key, old)| {
                right
                    .get(key)
                    .filter(|new| *new != old)
                    .map(|new| (key.clone(), old.clone(), new.clone()))
            })
            .collect();

        prop_assert_eq!(reported, expected);
        for change in result.column_changes() {
            prop_assert_eq!(change.field(), "SupplierName");
        }
    }

    /// Row changes always precede column changes, and repeated runs agree.
    #[test]
    fn diff_is_deterministic(left in name_map(), right in name_map()) {
        let left_index = vendor_index(&left);
        let right_index = vendor_index(&right);
        let engine = DiffEngine::new();

        let first = engine.compare(&left_index, &right_index).unwrap();
        let second = engine.compare(&left_index, &right_index).unwrap();
        prop_assert_eq!(first.summary(), second.summary());

        let mut first_lines: Vec<String> = first.changes().iter().map(ToString::to_string).collect();
        let mut second_lines: Vec<String> = second.changes().iter().map(ToString::to_string).collect();
        first_lines.sort();
        second_lines.sort();
        prop_assert_eq!(first_lines, second_lines);

        let first_column = first
            .changes()
            .iter()
            .position(|c| !c.is_row_change())
            .unwrap_or(first.len());
        prop_assert!(first.changes()[first_column..].iter().all(|c| !c.is_row_change()));
    }

    /// Comparing a feed with itself never reports a change.
    #[test]
    fn self_comparison_is_empty(names in name_map()) {
        let index = vendor_index(&names);
        let result = DiffEngine::new()
            .with_identical_shortcut(false)
            .compare(&index, &index)
            .unwrap();
        prop_assert!(result.is_empty());
    }
}
