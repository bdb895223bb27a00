//! Diff computation stage.

use super::{IndexedPair, PipelineError};
use crate::config::AnalyzeConfig;
use crate::diff::{DiffEngine, DiffResult};

/// Run the two-pass comparison over an indexed pair.
pub fn compute_diff<'a>(
    config: &AnalyzeConfig,
    pair: &'a IndexedPair,
) -> Result<DiffResult<'a>, PipelineError> {
    let quiet = config.behavior.quiet;

    if !quiet {
        tracing::info!("Comparing {} records...", config.schema);
    }

    let result = DiffEngine::new()
        .compare(&pair.left, &pair.right)
        .map_err(|source| PipelineError::DiffFailed { source })?;

    if !quiet {
        if result.was_identical() {
            tracing::info!("Inputs hold identical data");
        }
        tracing::info!("Diff summary: {}", result.summary());
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzeConfigBuilder;
    use crate::index::FeedIndex;
    use crate::model::{Record, Schema};
    use std::path::PathBuf;

    fn index(rows: &[(&str, &str)]) -> FeedIndex {
        FeedIndex::from_records(
            Schema::Facility,
            "memory",
            rows.iter()
                .map(|(f, v)| Record::from_fields(Schema::Facility, [*f, *v]).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn test_compute_diff() {
        let config = AnalyzeConfigBuilder::new()
            .schema(Schema::Facility)
            .left_path(PathBuf::from("left"))
            .right_path(PathBuf::from("right"))
            .quiet(true)
            .build()
            .unwrap();
        let pair = IndexedPair {
            left: index(&[("F1", "V1"), ("F2", "V1")]),
            right: index(&[("F2", "V1"), ("F3", "V1")]),
        };

        let result = compute_diff(&config, &pair).unwrap();
        assert_eq!(result.summary().additions, 1);
        assert_eq!(result.summary().deletions, 1);
        assert_eq!(result.summary().column_changes, 0);
    }
}
