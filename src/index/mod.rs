//! Hash-indexed view of one feed file.
//!
//! A [`FeedIndex`] maps each record's identity hash to the record itself.
//! Building one reads the whole input, skips the configured number of
//! leading rows, and refuses to produce an index when any identity hash
//! occurs twice: every duplicate is collected first so that the error names
//! all of them at once.
//!
//! ```
//! use feed_analyzer::index::{index_reader, IndexOptions};
//! use feed_analyzer::model::Schema;
//!
//! let data = "FacilityID\tVendorID\nF1\tV1\nF2\tV1\n";
//! let index = index_reader(data.as_bytes(), "inline", Schema::Facility, &IndexOptions::default())
//!     .unwrap();
//! assert_eq!(index.len(), 2);
//! assert!(index.contains_key("f1v1"));
//! ```

mod builder;
mod reader;

pub use builder::IndexBuilder;
pub use reader::{index_file, index_reader};

use crate::config::{DEFAULT_DELIMITER, DEFAULT_SKIP_ROWS};
use crate::model::{Record, Schema};
use std::collections::HashMap;

/// How to read a delimited feed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    /// Single-byte field delimiter
    pub delimiter: u8,
    /// Leading rows dropped without inspection
    pub skip_rows: usize,
}

impl IndexOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            skip_rows: DEFAULT_SKIP_ROWS,
        }
    }

    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub const fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    /// Treat the first row as data.
    #[must_use]
    pub const fn no_header(self) -> Self {
        self.with_skip_rows(0)
    }
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Records of one feed file keyed by identity hash.
///
/// Every key is unique; an index with duplicates is never constructed.
#[derive(Debug, Clone)]
#[must_use]
pub struct FeedIndex {
    schema: Schema,
    source: String,
    records: HashMap<String, Record>,
    skipped_rows: usize,
    content_hash: u64,
}

impl FeedIndex {
    /// Index in-memory records, applying the same duplicate rules as file
    /// indexing. Record ordinals (1-based) stand in for line numbers.
    pub fn from_records<I>(
        schema: Schema,
        source: impl Into<String>,
        records: I,
    ) -> crate::error::Result<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut builder = IndexBuilder::new(schema, source);
        for (ordinal, record) in records.into_iter().enumerate() {
            builder.push(record, ordinal as u64 + 1)?;
        }
        builder.finish()
    }

    #[must_use]
    pub const fn schema(&self) -> Schema {
        self.schema
    }

    /// Label of the input this index was built from (usually its path).
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.records.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Identity hashes, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Records, in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.records.iter().map(|(key, record)| (key.as_str(), record))
    }

    /// Number of leading rows dropped before indexing.
    #[must_use]
    pub const fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// xxh3 digest of the data rows in file order, `0` for an empty input.
    #[must_use]
    pub const fn content_hash(&self) -> u64 {
        self.content_hash
    }
}
