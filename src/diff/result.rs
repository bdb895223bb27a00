//! Diff result structures.

use crate::model::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a detected change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Addition,
    Deletion,
    ColumnChange,
}

/// One detected difference between two feed indexes.
///
/// Every variant borrows its records from the indexes that were compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change<'a> {
    /// Record present only in the right (newer) index
    Addition(&'a Record),
    /// Record present only in the left (older) index
    Deletion(&'a Record),
    /// One differing field of a record present in both indexes
    ColumnChange(ColumnChange<'a>),
}

impl<'a> Change<'a> {
    #[must_use]
    pub const fn kind(&self) -> ChangeKind {
        match self {
            Self::Addition(_) => ChangeKind::Addition,
            Self::Deletion(_) => ChangeKind::Deletion,
            Self::ColumnChange(_) => ChangeKind::ColumnChange,
        }
    }

    /// Identity hash of the affected record.
    #[must_use]
    pub fn identity_hash(&self) -> &'a str {
        match self {
            Self::Addition(record) | Self::Deletion(record) => record.identity_hash(),
            Self::ColumnChange(change) => change.identity_hash(),
        }
    }

    #[must_use]
    pub const fn is_row_change(&self) -> bool {
        matches!(self, Self::Addition(_) | Self::Deletion(_))
    }
}

impl fmt::Display for Change<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Addition(record) => write!(f, "Addition: '{}'", record.identity_hash()),
            Self::Deletion(record) => write!(f, "Deletion: '{}'", record.identity_hash()),
            Self::ColumnChange(change) => change.fmt(f),
        }
    }
}

/// A field whose value differs between two records sharing an identity hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnChange<'a> {
    field: &'static str,
    field_index: usize,
    left: &'a Record,
    right: &'a Record,
}

impl<'a> ColumnChange<'a> {
    /// Describe the change at `field_index` between `left` and `right`.
    ///
    /// Returns `None` when the position is out of range or the values are
    /// equal, so an instance always names a real difference.
    #[must_use]
    pub fn new(field_index: usize, left: &'a Record, right: &'a Record) -> Option<Self> {
        let field = left.schema().field_name(field_index)?;
        let differs = left.value_at(field_index)? != right.value_at(field_index)?;
        differs.then_some(Self {
            field,
            field_index,
            left,
            right,
        })
    }

    /// Name of the differing field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    #[must_use]
    pub const fn field_index(&self) -> usize {
        self.field_index
    }

    #[must_use]
    pub fn left_value(&self) -> &'a str {
        self.left.value_at(self.field_index).unwrap_or_default()
    }

    #[must_use]
    pub fn right_value(&self) -> &'a str {
        self.right.value_at(self.field_index).unwrap_or_default()
    }

    /// Identity hash shared by both records.
    #[must_use]
    pub fn identity_hash(&self) -> &'a str {
        self.right.identity_hash()
    }

    #[must_use]
    pub const fn left(&self) -> &'a Record {
        self.left
    }

    #[must_use]
    pub const fn right(&self) -> &'a Record {
        self.right
    }
}

impl fmt::Display for ColumnChange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' [{}]: '{}' -> '{}'",
            self.identity_hash(),
            self.field,
            self.left_value(),
            self.right_value()
        )
    }
}

/// Summary statistics for a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub additions: usize,
    pub deletions: usize,
    pub column_changes: usize,
    /// Keys present on both sides with at least one differing field
    pub records_changed: usize,
    pub total_changes: usize,
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} addition(s), {} deletion(s), {} column change(s) across {} record(s)",
            self.additions, self.deletions, self.column_changes, self.records_changed
        )
    }
}

/// Complete result of comparing two feed indexes.
///
/// Row-level changes come first, followed by column-level changes.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct DiffResult<'a> {
    changes: Vec<Change<'a>>,
    summary: DiffSummary,
    identical: bool,
}

impl<'a> DiffResult<'a> {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty result for inputs whose data rows are byte-identical.
    pub(crate) fn identical() -> Self {
        Self {
            identical: true,
            ..Self::default()
        }
    }

    /// Build a result from row-level then column-level changes.
    pub fn from_passes(row_changes: Vec<Change<'a>>, column_changes: Vec<Change<'a>>) -> Self {
        let mut changes = row_changes;
        changes.extend(column_changes);
        let mut result = Self {
            changes,
            summary: DiffSummary::default(),
            identical: false,
        };
        result.calculate_summary();
        result
    }

    fn calculate_summary(&mut self) {
        let mut summary = DiffSummary::default();
        let mut last_changed: Option<&str> = None;
        for change in &self.changes {
            match change {
                Change::Addition(_) => summary.additions += 1,
                Change::Deletion(_) => summary.deletions += 1,
                Change::ColumnChange(column) => {
                    summary.column_changes += 1;
                    // Column changes of one record are emitted consecutively.
                    if last_changed != Some(column.identity_hash()) {
                        summary.records_changed += 1;
                        last_changed = Some(column.identity_hash());
                    }
                }
            }
        }
        summary.total_changes = self.changes.len();
        self.summary = summary;
    }

    #[must_use]
    pub fn changes(&self) -> &[Change<'a>] {
        &self.changes
    }

    #[must_use]
    pub fn into_changes(self) -> Vec<Change<'a>> {
        self.changes
    }

    #[must_use]
    pub const fn summary(&self) -> &DiffSummary {
        &self.summary
    }

    /// Check if there are any changes
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Whether the comparison was skipped because both inputs held the same data.
    #[must_use]
    pub const fn was_identical(&self) -> bool {
        self.identical
    }

    /// Records only in the right index.
    pub fn additions(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.changes.iter().filter_map(|change| match change {
            Change::Addition(record) => Some(*record),
            _ => None,
        })
    }

    /// Records only in the left index.
    pub fn deletions(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.changes.iter().filter_map(|change| match change {
            Change::Deletion(record) => Some(*record),
            _ => None,
        })
    }

    pub fn column_changes(&self) -> impl Iterator<Item = &ColumnChange<'a>> + '_ {
        self.changes.iter().filter_map(|change| match change {
            Change::ColumnChange(column) => Some(column),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Schema;

    fn facility(facility_id: &str, vendor_id: &str) -> Record {
        Record::from_fields(Schema::Facility, [facility_id, vendor_id]).unwrap()
    }

    fn vendor(id: &str, tax_id: &str) -> Record {
        let mut fields = vec![String::new(); Schema::Vendor.arity()];
        fields[0] = id.to_string();
        fields[2] = tax_id.to_string();
        Record::new(Schema::Vendor, fields).unwrap()
    }

    #[test]
    fn test_column_change_requires_a_difference() {
        let left = vendor("v1", "111");
        let right = vendor("v1", "222");

        assert!(ColumnChange::new(0, &left, &right).is_none());
        assert!(ColumnChange::new(99, &left, &right).is_none());

        let change = ColumnChange::new(2, &left, &right).unwrap();
        assert_eq!(change.field(), "TaxID");
        assert_eq!(change.left_value(), "111");
        assert_eq!(change.right_value(), "222");
        assert_eq!(change.identity_hash(), "v1");
    }

    #[test]
    fn test_display_formats() {
        let added = facility("F2", "V1");
        let removed = facility("F1", "V1");
        let left = vendor("V1", "111");
        let right = vendor("V1", "222");

        assert_eq!(Change::Addition(&added).to_string(), "Addition: 'f2v1'");
        assert_eq!(Change::Deletion(&removed).to_string(), "Deletion: 'f1v1'");
        let column = ColumnChange::new(2, &left, &right).unwrap();
        assert_eq!(
            Change::ColumnChange(column).to_string(),
            "'v1' [TaxID]: '111' -> '222'"
        );
    }

    #[test]
    fn test_summary_counts() {
        let added = facility("F2", "V1");
        let removed = facility("F1", "V1");
        let left = vendor("V1", "111");
        let mut right_fields = left.values().to_vec();
        right_fields[1] = "Acme".to_string();
        right_fields[2] = "222".to_string();
        let right = Record::new(Schema::Vendor, right_fields).unwrap();

        let columns: Vec<Change<'_>> = left
            .diff_columns(&right)
            .unwrap()
            .filter_map(|diff| ColumnChange::new(diff.index, &left, &right))
            .map(Change::ColumnChange)
            .collect();

        let result = DiffResult::from_passes(
            vec![Change::Deletion(&removed), Change::Addition(&added)],
            columns,
        );

        let summary = result.summary();
        assert_eq!(summary.additions, 1);
        assert_eq!(summary.deletions, 1);
        assert_eq!(summary.column_changes, 2);
        assert_eq!(summary.records_changed, 1);
        assert_eq!(summary.total_changes, 4);
        assert!(result.has_changes());
        assert!(result.changes()[0].is_row_change());
        assert!(!result.changes()[3].is_row_change());
        assert_eq!(result.additions().count(), 1);
        assert_eq!(result.deletions().count(), 1);
        assert_eq!(result.column_changes().count(), 2);
    }

    #[test]
    fn test_identical_result_is_empty() {
        let result = DiffResult::identical();
        assert!(result.was_identical());
        assert!(!result.has_changes());
        assert_eq!(*result.summary(), DiffSummary::default());
    }
}
