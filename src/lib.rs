//! **Row and column level change detection between feed snapshots.**
//!
//! `feed-analyzer` compares two exports of a delimited data feed and reports
//! what changed between them: records that were added, records that were
//! deleted, and individual field values that changed in records present in
//! both files. It is meant for reconciling exports from a source system that
//! may contain duplicate keys, inconsistent row counts, or missing headers.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the four fixed record shapes ([`Schema`]) and the
//!   [`Record`] type, which computes a case-insensitive identity hash from a
//!   schema-specific subset of its fields.
//! - **[`index`]**: builds a [`FeedIndex`] (identity hash to record) from a
//!   file or any reader. Duplicate identities are collected across the whole
//!   input and reported together.
//! - **[`diff`]**: the [`DiffEngine`], a two-pass comparison producing
//!   additions and deletions first, then per-field column changes.
//! - **[`reports`]**: CSV files and a console listing.
//! - **[`pipeline`]**: index → diff → report orchestration used by the CLI.
//!
//! ## Comparing Two Feeds
//!
//! ```
//! use feed_analyzer::{index_reader, DiffEngine, IndexOptions, Schema};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = IndexOptions::default();
//!     let left = index_reader(
//!         "VendorID\tGLAccount\tDefault\nV1\t6000\tY\n".as_bytes(),
//!         "left",
//!         Schema::GeneralLedger,
//!         &options,
//!     )?;
//!     let right = index_reader(
//!         "VendorID\tGLAccount\tDefault\nV1\t6000\tY\nV2\t6100\tN\n".as_bytes(),
//!         "right",
//!         Schema::GeneralLedger,
//!         &options,
//!     )?;
//!
//!     let result = DiffEngine::new().compare(&left, &right)?;
//!     for change in result.changes() {
//!         println!("{change}");
//!     }
//!     assert_eq!(result.summary().additions, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `feed-analyzer` binary wraps this library with one subcommand per
//! schema (`facility`, `gl`, `vendor`, `remit`).

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod index;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod utils;

// Re-export main types for convenience
pub use config::{AnalyzeConfig, AnalyzeConfigBuilder, AppConfig, ConfigError, Validatable};
pub use diff::{Change, ChangeKind, ColumnChange, DiffEngine, DiffResult, DiffSummary};
pub use error::{ErrorContext, FeedError, Result};
pub use index::{index_file, index_reader, FeedIndex, IndexOptions};
pub use model::{Record, Schema};
pub use reports::{ConsoleReporter, CsvReporter, WriterReporter};
