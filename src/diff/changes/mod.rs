//! Change computer implementations.
//!
//! This module provides the two passes of a comparison as implementations of
//! the `ChangeComputer` trait: whole-record changes and per-field changes.

mod columns;
mod rows;

pub use columns::ColumnChangeComputer;
pub use rows::RowChangeComputer;
