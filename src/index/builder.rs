//! Incremental index construction with duplicate accumulation.

use super::FeedIndex;
use crate::error::{DuplicateKey, FeedError, Result, SchemaErrorKind};
use crate::model::{Record, Schema};
use crate::utils::RowHasher;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Collects records for one [`FeedIndex`].
///
/// Duplicate identity hashes do not stop the build; they are recorded with
/// every line they occur on and reported together by [`finish`](Self::finish).
pub struct IndexBuilder {
    schema: Schema,
    source: String,
    records: HashMap<String, Record>,
    first_lines: HashMap<String, u64>,
    duplicates: Vec<DuplicateKey>,
    duplicate_slots: HashMap<String, usize>,
    hasher: RowHasher,
    skipped_rows: usize,
}

impl IndexBuilder {
    #[must_use]
    pub fn new(schema: Schema, source: impl Into<String>) -> Self {
        Self {
            schema,
            source: source.into(),
            records: HashMap::new(),
            first_lines: HashMap::new(),
            duplicates: Vec::new(),
            duplicate_slots: HashMap::new(),
            hasher: RowHasher::new(),
            skipped_rows: 0,
        }
    }

    /// Note a leading row that was dropped unread.
    pub fn skip_row(&mut self, line: u64) {
        tracing::debug!("Skipping row at line {line} of {}", self.source);
        self.skipped_rows += 1;
    }

    /// Add one record read from `line`.
    ///
    /// Fails only if the record belongs to a different schema.
    pub fn push(&mut self, record: Record, line: u64) -> Result<()> {
        if record.schema() != self.schema {
            return Err(FeedError::schema(
                format!("indexing {}", self.source),
                SchemaErrorKind::Mismatch {
                    left: self.schema.selector(),
                    right: record.schema().selector(),
                },
            ));
        }

        self.hasher
            .update(record.values().iter().map(String::as_str));

        match self.records.entry(record.identity_hash().to_string()) {
            Entry::Vacant(slot) => {
                self.first_lines.insert(slot.key().clone(), line);
                slot.insert(record);
            }
            Entry::Occupied(slot) => {
                let key = slot.key();
                if let Some(&pos) = self.duplicate_slots.get(key) {
                    self.duplicates[pos].lines.push(line);
                } else {
                    let first = self.first_lines.get(key).copied().unwrap_or_default();
                    self.duplicate_slots
                        .insert(key.clone(), self.duplicates.len());
                    self.duplicates.push(DuplicateKey {
                        key: key.clone(),
                        lines: vec![first, line],
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of distinct keys seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Produce the index, or fail with every duplicate found.
    pub fn finish(self) -> Result<FeedIndex> {
        if !self.duplicates.is_empty() {
            for duplicate in &self.duplicates {
                tracing::error!(
                    "Duplicate: '{}' in {} (lines {:?})",
                    duplicate.key,
                    self.source,
                    duplicate.lines
                );
            }
            return Err(FeedError::duplicate_rows(self.source, self.duplicates));
        }

        tracing::debug!(
            "Indexed {} {} records from {}",
            self.records.len(),
            self.schema,
            self.source
        );

        Ok(FeedIndex {
            schema: self.schema,
            content_hash: self.hasher.finish(),
            source: self.source,
            records: self.records,
            skipped_rows: self.skipped_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gl(vendor: &str, account: &str, default: &str) -> Record {
        Record::from_fields(Schema::GeneralLedger, [vendor, account, default]).unwrap()
    }

    #[test]
    fn test_collects_every_duplicate_before_failing() {
        let mut builder = IndexBuilder::new(Schema::GeneralLedger, "gl.tdf");
        builder.push(gl("V1", "6000", "Y"), 2).unwrap();
        builder.push(gl("V2", "6000", "Y"), 3).unwrap();
        builder.push(gl("v1", "6000", "y"), 4).unwrap();
        builder.push(gl("V2", "6000", "Y"), 5).unwrap();
        builder.push(gl("V1", "6000", "Y"), 6).unwrap();
        assert_eq!(builder.len(), 2);

        match builder.finish().unwrap_err() {
            FeedError::DuplicateRows {
                context,
                duplicates,
            } => {
                assert_eq!(context, "gl.tdf");
                assert_eq!(
                    duplicates,
                    vec![
                        DuplicateKey {
                            key: "v16000y".to_string(),
                            lines: vec![2, 4, 6],
                        },
                        DuplicateKey {
                            key: "v26000y".to_string(),
                            lines: vec![3, 5],
                        },
                    ]
                );
            }
            other => panic!("Expected DuplicateRows, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_foreign_schema() {
        let mut builder = IndexBuilder::new(Schema::Facility, "facility.tdf");
        let err = builder.push(gl("V1", "6000", "Y"), 2).unwrap_err();
        assert!(matches!(err, FeedError::Schema { .. }));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_skip_rows_are_counted() {
        let mut builder = IndexBuilder::new(Schema::GeneralLedger, "gl.tdf");
        builder.skip_row(1);
        builder.push(gl("V1", "6000", "Y"), 2).unwrap();
        let index = builder.finish().unwrap();
        assert_eq!(index.skipped_rows(), 1);
        assert_eq!(index.len(), 1);
    }
}
