//! Column-level change computer implementation.

use crate::diff::traits::ChangeComputer;
use crate::diff::{Change, ColumnChange};
use crate::error::{ErrorContext, Result};
use crate::index::FeedIndex;

/// Computes per-field changes for keys present in both indexes.
///
/// Keys found on one side only are left to [`RowChangeComputer`](super::RowChangeComputer).
/// Changes of one record are emitted together in ascending field order.
pub struct ColumnChangeComputer;

impl ColumnChangeComputer {
    /// Create a new column change computer.
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ColumnChangeComputer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeComputer for ColumnChangeComputer {
    fn compute<'a>(&self, left: &'a FeedIndex, right: &'a FeedIndex) -> Result<Vec<Change<'a>>> {
        let mut changes = Vec::new();

        for (key, right_record) in right.iter() {
            let Some(left_record) = left.get(key) else {
                continue;
            };

            let diffs = left_record
                .diff_columns(right_record)
                .with_context(|| format!("comparing '{key}'"))?;

            for diff in diffs {
                if let Some(change) = ColumnChange::new(diff.index, left_record, right_record) {
                    tracing::warn!(
                        "'{}' [{}]: '{}' -> '{}'",
                        change.identity_hash(),
                        change.field(),
                        diff.left,
                        diff.right
                    );
                    changes.push(Change::ColumnChange(change));
                }
            }
        }

        Ok(changes)
    }

    fn name(&self) -> &str {
        "ColumnChangeComputer"
    }
}
