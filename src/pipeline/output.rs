//! Output handling for diff results.
//!
//! Results go either to three CSV files or to stdout as a console listing.

use crate::config::AnalyzeConfig;
use crate::diff::DiffResult;
use crate::model::Schema;
use crate::reports::{ConsoleReporter, CsvReporter, ReportError, WriterReporter};
use std::io::Write;
use std::path::PathBuf;

/// Target for output - either stdout or a set of CSV files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Print a console listing to stdout
    Stdout,
    /// Write `{base}-adds.csv`, `{base}-dels.csv` and `{base}-updates.csv`
    Files(PathBuf),
}

impl OutputTarget {
    /// Output target selected by a run configuration
    #[must_use]
    pub fn from_config(config: &AnalyzeConfig) -> Self {
        if config.output.suppress {
            Self::Stdout
        } else {
            Self::Files(config.output_base())
        }
    }
}

/// Write a diff result to the target.
pub fn write_output(
    result: &DiffResult<'_>,
    schema: Schema,
    target: &OutputTarget,
    quiet: bool,
) -> Result<(), ReportError> {
    match target {
        OutputTarget::Stdout => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            ConsoleReporter::new(schema.selector()).write_diff_to(result, &mut handle)?;
            handle.flush()?;
            Ok(())
        }
        OutputTarget::Files(base) => {
            let files = CsvReporter::new(schema).write_files(result, base)?;
            if !quiet {
                for path in files.iter() {
                    tracing::info!("Report written to {}", path.display());
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzeConfigBuilder;

    fn builder() -> AnalyzeConfigBuilder {
        AnalyzeConfigBuilder::new()
            .schema(Schema::RemitTo)
            .left_path(PathBuf::from("left"))
            .right_path(PathBuf::from("right"))
    }

    #[test]
    fn test_output_target_from_config() {
        let config = builder().build().unwrap();
        assert_eq!(
            OutputTarget::from_config(&config),
            OutputTarget::Files(PathBuf::from("remit"))
        );

        let config = builder().suppress_output(true).build().unwrap();
        assert_eq!(OutputTarget::from_config(&config), OutputTarget::Stdout);
    }

    #[test]
    fn test_write_output_to_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let base = tmp.path().join("remit");
        let result = DiffResult::new();

        write_output(&result, Schema::RemitTo, &OutputTarget::Files(base), true).unwrap();

        assert!(tmp.path().join("remit-adds.csv").exists());
        assert!(tmp.path().join("remit-dels.csv").exists());
        assert!(tmp.path().join("remit-updates.csv").exists());
    }
}
