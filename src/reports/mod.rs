//! Report generation for diff results.
//!
//! Two outputs are supported:
//! - CSV: three comma-separated files per run (`{prefix}-adds.csv`,
//!   `{prefix}-dels.csv`, `{prefix}-updates.csv`)
//! - Console: one line per change followed by a summary line
//!
//! CSV output is always comma-separated, whatever delimiter the input used.

mod console;
mod csv;

pub use self::console::ConsoleReporter;
pub use self::csv::{CsvReporter, OutputFiles};

use crate::diff::DiffResult;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] ::csv::Error),

    #[error("Failed to create {}: {source}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Trait for reporters that render a whole diff to one writer.
pub trait WriterReporter {
    /// Write a diff report to a writer.
    fn write_diff_to<W: Write>(
        &self,
        result: &DiffResult<'_>,
        writer: &mut W,
    ) -> Result<(), ReportError>;
}
