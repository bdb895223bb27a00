//! Row-level change computer implementation.

use crate::diff::traits::ChangeComputer;
use crate::diff::Change;
use crate::error::Result;
use crate::index::FeedIndex;

/// Computes additions and deletions: keys present in only one index.
///
/// Deletions are emitted before additions. Order within each group follows
/// the index's unordered key iteration.
pub struct RowChangeComputer;

impl RowChangeComputer {
    /// Create a new row change computer.
    pub const fn new() -> Self {
        Self
    }
}

impl Default for RowChangeComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeComputer for RowChangeComputer {
    fn compute<'a>(&self, left: &'a FeedIndex, right: &'a FeedIndex) -> Result<Vec<Change<'a>>> {
        let deletions = left
            .iter()
            .filter(|(key, _)| !right.contains_key(key))
            .map(|(_, record)| Change::Deletion(record));

        let additions = right
            .iter()
            .filter(|(key, _)| !left.contains_key(key))
            .map(|(_, record)| Change::Addition(record));

        let changes: Vec<Change<'a>> = deletions.chain(additions).collect();
        for change in &changes {
            tracing::debug!("{change}");
        }
        Ok(changes)
    }

    fn name(&self) -> &str {
        "RowChangeComputer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ChangeKind;
    use crate::model::{Record, Schema};
    use std::collections::HashSet;

    fn facilities(keys: &[(&str, &str)]) -> FeedIndex {
        FeedIndex::from_records(
            Schema::Facility,
            "memory",
            keys.iter()
                .map(|(f, v)| Record::from_fields(Schema::Facility, [*f, *v]).unwrap()),
        )
        .unwrap()
    }

    fn keys_of(changes: &[Change<'_>], kind: ChangeKind) -> HashSet<String> {
        changes
            .iter()
            .filter(|change| change.kind() == kind)
            .map(|change| change.identity_hash().to_string())
            .collect()
    }

    #[test]
    fn test_row_change_computer_default() {
        let computer = RowChangeComputer::default();
        assert_eq!(computer.name(), "RowChangeComputer");
    }

    #[test]
    fn test_set_differences() {
        let left = facilities(&[("F1", "V1"), ("F2", "V1"), ("F3", "V1")]);
        let right = facilities(&[("F2", "V1"), ("F3", "V1"), ("F4", "V1"), ("F5", "V1")]);

        let changes = RowChangeComputer::new().compute(&left, &right).unwrap();

        assert_eq!(
            keys_of(&changes, ChangeKind::Deletion),
            HashSet::from(["f1v1".to_string()])
        );
        assert_eq!(
            keys_of(&changes, ChangeKind::Addition),
            HashSet::from(["f4v1".to_string(), "f5v1".to_string()])
        );
        assert_eq!(changes.len(), 3);
    }

    #[test]
    fn test_deletions_precede_additions() {
        let left = facilities(&[("A", "1"), ("B", "1")]);
        let right = facilities(&[("C", "1"), ("D", "1")]);

        let changes = RowChangeComputer::new().compute(&left, &right).unwrap();
        let kinds: Vec<ChangeKind> = changes.iter().map(Change::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Deletion,
                ChangeKind::Deletion,
                ChangeKind::Addition,
                ChangeKind::Addition
            ]
        );
    }

    #[test]
    fn test_case_only_differences_are_not_row_changes() {
        let left = facilities(&[("AAA", "BBB")]);
        let right = facilities(&[("aaa", "bbb")]);

        let changes = RowChangeComputer::new().compute(&left, &right).unwrap();
        assert!(changes.is_empty());
    }
}
