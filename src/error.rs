//! Unified error types for feed-analyzer.
//!
//! This module provides the error hierarchy for the library, with enough
//! context on every variant to tell the user which file, line, or key
//! triggered the failure.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for feed-analyzer operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FeedError {
    /// A row could not be turned into a record
    #[error("Failed to parse feed: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// One or more identity hashes occurred more than once in a single file
    #[error("Duplicate rows in {context}: {}", format_duplicates(.duplicates))]
    DuplicateRows {
        context: String,
        duplicates: Vec<DuplicateKey>,
    },

    /// Misuse of a schema (unknown field, mismatched schemas)
    #[error("Schema error: {context}")]
    Schema {
        context: String,
        #[source]
        source: SchemaErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("expected {expected} fields for {schema} rows, found {found}")]
    FieldCount {
        schema: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("malformed delimited data: {0}")]
    Malformed(String),
}

/// Specific schema error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SchemaErrorKind {
    #[error("no such field '{field}' in {schema} schema")]
    NoSuchField { schema: &'static str, field: String },

    #[error("cannot compare {left} records with {right} records")]
    Mismatch {
        left: &'static str,
        right: &'static str,
    },

    #[error("unknown schema selector '{0}' (expected facility, gl, vendor or remit)")]
    UnknownSelector(String),
}

/// A key that appeared more than once while indexing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    /// The normalized identity hash
    pub key: String,
    /// Line numbers of every occurrence, first one included
    pub lines: Vec<u64>,
}

fn format_duplicates(duplicates: &[DuplicateKey]) -> String {
    let listed = duplicates
        .iter()
        .map(|d| {
            let lines = d
                .lines
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("'{}' (lines {lines})", d.key)
        })
        .collect::<Vec<_>>()
        .join("; ");
    format!("{} duplicate key(s): {listed}", duplicates.len())
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for feed-analyzer operations
pub type Result<T> = std::result::Result<T, FeedError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl FeedError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a field count error for a row of the given schema
    pub fn field_count(schema: &'static str, expected: usize, found: usize) -> Self {
        Self::parse(
            "wrong number of fields",
            ParseErrorKind::FieldCount {
                schema,
                expected,
                found,
            },
        )
    }

    /// Create a duplicate rows error
    pub fn duplicate_rows(context: impl Into<String>, duplicates: Vec<DuplicateKey>) -> Self {
        Self::DuplicateRows {
            context: context.into(),
            duplicates,
        }
    }

    /// Create a schema error with context
    pub fn schema(context: impl Into<String>, source: SchemaErrorKind) -> Self {
        Self::Schema {
            context: context.into(),
            source,
        }
    }

    /// Create a "no such field" error
    pub fn no_such_field(schema: &'static str, field: impl Into<String>) -> Self {
        Self::schema(
            "field lookup",
            SchemaErrorKind::NoSuchField {
                schema,
                field: field.into(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Keys reported by a duplicate rows error, empty for every other kind.
    #[must_use]
    pub fn duplicate_keys(&self) -> Vec<&str> {
        match self {
            Self::DuplicateRows { duplicates, .. } => {
                duplicates.iter().map(|d| d.key.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The new context is prepended to whatever context the error already
/// carries, so a failure deep in indexing reads as
/// `indexing left file: line 4: wrong number of fields`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<FeedError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: FeedError, new_ctx: &str) -> FeedError {
    match err {
        FeedError::Parse {
            context: existing,
            source,
        } => FeedError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        FeedError::DuplicateRows {
            context: existing,
            duplicates,
        } => FeedError::DuplicateRows {
            context: chain_context(new_ctx, &existing),
            duplicates,
        },
        FeedError::Schema {
            context: existing,
            source,
        } => FeedError::Schema {
            context: chain_context(new_ctx, &existing),
            source,
        },
        FeedError::Io {
            path,
            message,
            source,
        } => FeedError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
    }
}

/// Returns `"new: existing"`, or just `new` when nothing exists yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
