//! Analyze command handler.
//!
//! Implements the `facility`, `gl`, `vendor` and `remit` subcommands, which
//! compare two snapshots of one feed schema.

use crate::config::{AnalyzeConfig, Validatable};
use crate::diff::DiffResult;
use crate::pipeline::{compute_diff, exit_codes, index_inputs, output_report};
use anyhow::Result;

/// Run a comparison, returning the desired exit code.
///
/// The configuration is validated before any file is opened, and nothing is
/// written unless both inputs index cleanly.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_analyze(config: AnalyzeConfig) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("Invalid configuration: {}", details.join("; "));
    }

    let pair = index_inputs(&config)?;
    let result = compute_diff(&config, &pair)?;
    let exit_code = determine_exit_code(&config, &result);

    output_report(&config, &result)?;

    Ok(exit_code)
}

/// Determine the appropriate exit code based on diff results and config flags.
fn determine_exit_code(config: &AnalyzeConfig, result: &DiffResult<'_>) -> i32 {
    if config.behavior.fail_on_change && result.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
