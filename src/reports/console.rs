//! Console listing for terminal usage.

use super::{ReportError, WriterReporter};
use crate::diff::DiffResult;
use std::io::Write;

/// Prints one line per change, then a summary line.
pub struct ConsoleReporter {
    label: String,
    summary: bool,
}

impl ConsoleReporter {
    /// Create a reporter whose summary line starts with `label`
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            summary: true,
        }
    }

    /// Omit the trailing summary line
    #[must_use]
    pub const fn without_summary(mut self) -> Self {
        self.summary = false;
        self
    }
}

impl WriterReporter for ConsoleReporter {
    fn write_diff_to<W: Write>(
        &self,
        result: &DiffResult<'_>,
        writer: &mut W,
    ) -> Result<(), ReportError> {
        for change in result.changes() {
            writeln!(writer, "{change}")?;
        }
        if self.summary {
            if result.has_changes() {
                writeln!(writer)?;
            }
            writeln!(writer, "{}: {}", self.label, result.summary())?;
        }
        Ok(())
    }
}
