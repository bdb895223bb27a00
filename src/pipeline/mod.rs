//! Pipeline orchestration for feed comparisons.
//!
//! This module provides the index → diff → report workflow shared by every
//! schema subcommand.

mod diff_stage;
mod index_stage;
mod output;
mod report_stage;

pub use diff_stage::compute_diff;
pub use index_stage::{index_inputs, IndexedPair};
pub use output::{write_output, OutputTarget};
pub use report_stage::output_report;

use crate::error::FeedError;
use crate::reports::ReportError;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or index a feed file
    #[error("Indexing failed for {path}: {source}")]
    IndexFailed {
        path: String,
        #[source]
        source: FeedError,
    },

    /// Diff computation failed
    #[error("Diff failed: {source}")]
    DiffFailed {
        #[source]
        source: FeedError,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: ReportError,
    },
}

impl PipelineError {
    /// The underlying feed error, if the failure came from indexing or diffing.
    #[must_use]
    pub const fn feed_error(&self) -> Option<&FeedError> {
        match self {
            Self::IndexFailed { source, .. } | Self::DiffFailed { source } => Some(source),
            Self::ReportFailed { .. } => None,
        }
    }
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or changes without --fail-on-change)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected and --fail-on-change was given
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::CHANGES_DETECTED, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }

    #[test]
    fn test_feed_error_accessor() {
        let err = PipelineError::DiffFailed {
            source: FeedError::field_count("gl", 3, 2),
        };
        assert!(err.feed_error().is_some());

        let err = PipelineError::ReportFailed {
            source: ReportError::IoError(std::io::Error::other("disk full")),
        };
        assert!(err.feed_error().is_none());
        assert!(err.to_string().contains("disk full"));
    }
}
