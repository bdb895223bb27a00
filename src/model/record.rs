//! A single feed row viewed through its schema.

use super::Schema;
use crate::error::{FeedError, Result, SchemaErrorKind};
use std::fmt;
use std::iter::{Enumerate, Zip};
use std::slice::Iter;

/// One data row of a feed file.
///
/// The identity hash is computed once at construction. Equality compares
/// positional values only; two records with the same identity but different
/// field values are unequal.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Schema,
    values: Vec<String>,
    identity: String,
}

impl Record {
    /// Build a record, rejecting rows whose field count does not match the
    /// schema.
    pub fn new(schema: Schema, values: Vec<String>) -> Result<Self> {
        if values.len() != schema.arity() {
            return Err(FeedError::field_count(
                schema.selector(),
                schema.arity(),
                values.len(),
            ));
        }
        let identity = schema.identity_of(&values);
        Ok(Self {
            schema,
            values,
            identity,
        })
    }

    /// Build a record from borrowed field values.
    pub fn from_fields<I, S>(schema: Schema, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(schema, fields.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub const fn schema(&self) -> Schema {
        self.schema
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Field names of this record's schema, in value order.
    #[must_use]
    pub const fn field_names(&self) -> &'static [&'static str] {
        self.schema.fields()
    }

    /// The normalized business key of this record.
    #[must_use]
    pub fn identity_hash(&self) -> &str {
        &self.identity
    }

    /// Value of a named field.
    pub fn field(&self, name: &str) -> Result<&str> {
        self.schema
            .field_index(name)
            .map(|idx| self.values[idx].as_str())
            .ok_or_else(|| FeedError::no_such_field(self.schema.selector(), name))
    }

    /// Value at a field position, if in range.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Lazily yield every position at which `self` and `other` differ.
    ///
    /// Both records must share a schema.
    pub fn diff_columns<'a>(&'a self, other: &'a Self) -> Result<ColumnDiffs<'a>> {
        if self.schema != other.schema {
            return Err(FeedError::schema(
                format!("diffing '{}'", self.identity),
                SchemaErrorKind::Mismatch {
                    left: self.schema.selector(),
                    right: other.schema.selector(),
                },
            ));
        }
        Ok(ColumnDiffs {
            pairs: self.values.iter().zip(other.values.iter()).enumerate(),
        })
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for Record {}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.schema, self.identity)
    }
}

/// A differing field position between two records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDiff<'a> {
    pub index: usize,
    pub left: &'a str,
    pub right: &'a str,
}

/// Iterator returned by [`Record::diff_columns`].
#[derive(Debug, Clone)]
pub struct ColumnDiffs<'a> {
    pairs: Enumerate<Zip<Iter<'a, String>, Iter<'a, String>>>,
}

impl<'a> Iterator for ColumnDiffs<'a> {
    type Item = ColumnDiff<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pairs.find_map(|(index, (left, right))| {
            (left != right).then(|| ColumnDiff {
                index,
                left: left.as_str(),
                right: right.as_str(),
            })
        })
    }
}
