//! Trait definitions for diff computation strategies.
//!
//! Each pass of a comparison is a [`ChangeComputer`], which keeps the passes
//! independently testable.

use super::Change;
use crate::error::Result;
use crate::index::FeedIndex;

/// Trait for computing one category of changes between two feed indexes.
///
/// Implementors must not keep state between calls.
pub trait ChangeComputer: Send + Sync {
    /// Compute changes between `left` (older) and `right` (newer).
    fn compute<'a>(&self, left: &'a FeedIndex, right: &'a FeedIndex) -> Result<Vec<Change<'a>>>;

    /// Get the name of this change computer for logging/debugging.
    fn name(&self) -> &str;
}
