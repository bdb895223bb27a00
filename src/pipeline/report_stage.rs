//! Report output stage.

use super::{write_output, OutputTarget, PipelineError};
use crate::config::AnalyzeConfig;
use crate::diff::DiffResult;

/// Output a diff result to the configured destination.
pub fn output_report(config: &AnalyzeConfig, result: &DiffResult<'_>) -> Result<(), PipelineError> {
    let target = OutputTarget::from_config(config);
    write_output(result, config.schema, &target, config.behavior.quiet)
        .map_err(|source| PipelineError::ReportFailed { source })
}
