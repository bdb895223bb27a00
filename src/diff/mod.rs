//! Two-pass diff engine for feed snapshots.
//!
//! # Architecture
//!
//! A comparison runs two independent passes, each a
//! [`ChangeComputer`](traits::ChangeComputer):
//!
//! - [`RowChangeComputer`](changes::RowChangeComputer): keys present in only
//!   one index become a `Deletion` (left only) or an `Addition` (right only)
//! - [`ColumnChangeComputer`](changes::ColumnChangeComputer): keys present in
//!   both indexes yield one `ColumnChange` per differing field
//!
//! Row-level changes precede column-level changes in the result. Every
//! change borrows its records from the compared indexes, so both must
//! outlive the [`DiffResult`].
//!
//! # Example
//!
//! ```
//! use feed_analyzer::diff::DiffEngine;
//! use feed_analyzer::index::{index_reader, IndexOptions};
//! use feed_analyzer::model::Schema;
//!
//! let options = IndexOptions::default();
//! let left = index_reader("h\th\nF1\tV1\n".as_bytes(), "left", Schema::Facility, &options).unwrap();
//! let right = index_reader("h\th\nF2\tV1\n".as_bytes(), "right", Schema::Facility, &options).unwrap();
//!
//! let result = DiffEngine::new().compare(&left, &right).unwrap();
//! assert_eq!(result.summary().additions, 1);
//! assert_eq!(result.summary().deletions, 1);
//! ```

pub mod changes;
mod engine;
mod result;
pub mod traits;

pub use engine::DiffEngine;
pub use result::{Change, ChangeKind, ColumnChange, DiffResult, DiffSummary};
pub use traits::ChangeComputer;
