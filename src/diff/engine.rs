//! Two-pass diff engine implementation.

use super::changes::{ColumnChangeComputer, RowChangeComputer};
use super::traits::ChangeComputer;
use super::DiffResult;
use crate::error::{FeedError, Result, SchemaErrorKind};
use crate::index::FeedIndex;

/// Compares two feed indexes of the same schema.
///
/// The engine holds configuration only; every [`compare`](Self::compare)
/// call is independent.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    identical_shortcut: bool,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    #[must_use]
    pub const fn new() -> Self {
        Self {
            identical_shortcut: true,
        }
    }

    /// Skip both passes when the two indexes were built from identical data rows.
    #[must_use]
    pub const fn with_identical_shortcut(mut self, enabled: bool) -> Self {
        self.identical_shortcut = enabled;
        self
    }

    /// Compare `left` (older) with `right` (newer).
    ///
    /// Row-level changes (deletions, then additions) come first, followed by
    /// column-level changes. Indexes of different schemas are rejected.
    pub fn compare<'a>(&self, left: &'a FeedIndex, right: &'a FeedIndex) -> Result<DiffResult<'a>> {
        if left.schema() != right.schema() {
            return Err(FeedError::schema(
                format!("comparing {} with {}", left.source(), right.source()),
                SchemaErrorKind::Mismatch {
                    left: left.schema().selector(),
                    right: right.schema().selector(),
                },
            ));
        }

        // Quick check: identical data rows cannot produce changes
        if self.identical_shortcut
            && left.content_hash() != 0
            && left.content_hash() == right.content_hash()
        {
            tracing::debug!(
                "{} and {} hold identical data, skipping comparison",
                left.source(),
                right.source()
            );
            return Ok(DiffResult::identical());
        }

        let row_computer = RowChangeComputer::new();
        let row_changes = row_computer.compute(left, right)?;
        tracing::debug!("{} produced {} change(s)", row_computer.name(), row_changes.len());

        let column_computer = ColumnChangeComputer::new();
        let column_changes = column_computer.compute(left, right)?;
        tracing::debug!(
            "{} produced {} change(s)",
            column_computer.name(),
            column_changes.len()
        );

        Ok(DiffResult::from_passes(row_changes, column_changes))
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}
