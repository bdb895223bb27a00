//! Feed indexing stage.
//!
//! Indexes the left and right inputs, either one after the other or on two
//! worker threads. Any failure aborts before a diff is attempted.

use super::PipelineError;
use crate::config::AnalyzeConfig;
use crate::index::{index_file, FeedIndex, IndexOptions};
use crate::model::Schema;
use std::path::Path;

/// Both indexes of one comparison run.
#[derive(Debug)]
pub struct IndexedPair {
    /// Index of the older snapshot
    pub left: FeedIndex,
    /// Index of the newer snapshot
    pub right: FeedIndex,
}

/// Index both inputs named by `config`.
///
/// With parallel indexing enabled both files are read concurrently; the
/// left file's error is reported first when both fail.
pub fn index_inputs(config: &AnalyzeConfig) -> Result<IndexedPair, PipelineError> {
    let quiet = config.behavior.quiet;
    let options = config.index_options();
    let schema = config.schema;
    let (left_path, right_path) = (&config.paths.left, &config.paths.right);

    if left_path == right_path {
        tracing::warn!(
            "Left and right inputs are the same file: {}",
            left_path.display()
        );
    }

    let (left, right) = if config.indexing.parallel {
        tracing::debug!("Indexing inputs in parallel");
        rayon::join(
            || index_one(left_path, schema, &options, quiet),
            || index_one(right_path, schema, &options, quiet),
        )
    } else {
        let left = index_one(left_path, schema, &options, quiet)?;
        (Ok(left), index_one(right_path, schema, &options, quiet))
    };

    Ok(IndexedPair {
        left: left?,
        right: right?,
    })
}

fn index_one(
    path: &Path,
    schema: Schema,
    options: &IndexOptions,
    quiet: bool,
) -> Result<FeedIndex, PipelineError> {
    if !quiet {
        tracing::info!("Indexing {} file: {}", schema, path.display());
    }

    let index = index_file(path, schema, options).map_err(|source| PipelineError::IndexFailed {
        path: path.display().to_string(),
        source,
    })?;

    if !quiet {
        tracing::info!(
            "Indexed {} record(s) from {} ({} leading row(s) skipped)",
            index.len(),
            path.display(),
            index.skipped_rows()
        );
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzeConfigBuilder;
    use crate::error::FeedError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn config(left: PathBuf, right: PathBuf, parallel: bool) -> AnalyzeConfig {
        AnalyzeConfigBuilder::new()
            .schema(Schema::Facility)
            .left_path(left)
            .right_path(right)
            .parallel(parallel)
            .quiet(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let tmp = TempDir::new().unwrap();
        let left = write(&tmp, "left.tdf", "FacilityID\tVendorID\nF1\tV1\n");
        let right = write(&tmp, "right.tdf", "FacilityID\tVendorID\nF1\tV1\nF2\tV1\n");

        for parallel in [false, true] {
            let pair = index_inputs(&config(left.clone(), right.clone(), parallel)).unwrap();
            assert_eq!(pair.left.len(), 1);
            assert_eq!(pair.right.len(), 2);
        }
    }

    #[test]
    fn test_left_failure_is_reported() {
        let tmp = TempDir::new().unwrap();
        let left = write(&tmp, "left.tdf", "h\th\nAAA\tBBB\naaa\tbbb\n");
        let right = write(&tmp, "right.tdf", "h\th\nF1\tV1\n");

        for parallel in [false, true] {
            let err = index_inputs(&config(left.clone(), right.clone(), parallel)).unwrap_err();
            match err {
                PipelineError::IndexFailed { path, source } => {
                    assert!(path.ends_with("left.tdf"), "{path}");
                    assert!(matches!(source, FeedError::DuplicateRows { .. }));
                }
                other => panic!("Expected IndexFailed, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_right_file() {
        let tmp = TempDir::new().unwrap();
        let left = write(&tmp, "left.tdf", "h\th\nF1\tV1\n");

        let err =
            index_inputs(&config(left, tmp.path().join("missing.tdf"), false)).unwrap_err();
        assert!(matches!(
            err.feed_error(),
            Some(FeedError::Io { .. })
        ));
    }
}
