//! Configuration types for feed-analyzer operations.

use super::defaults::{DEFAULT_DELIMITER, DEFAULT_SKIP_ROWS};
use crate::index::IndexOptions;
use crate::model::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// File-level Configuration
// ============================================================================

/// Defaults that can be loaded from a config file.
///
/// Command-line flags override every value set here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// How feed files are read
    pub indexing: IndexingConfig,
    /// Where and how results are written
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Indexing options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct IndexingConfig {
    /// Leading rows skipped in every input file (0 = none)
    pub skip_rows: usize,
    /// Index the left and right files on two threads
    pub parallel: bool,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            skip_rows: DEFAULT_SKIP_ROWS,
            parallel: false,
        }
    }
}

/// Output options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Print results instead of writing CSV files
    pub suppress: bool,
    /// Output file name prefix (defaults to the schema selector)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Directory the CSV files are written to (defaults to the working directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Suppress non-essential output
    pub quiet: bool,
    /// Exit with code 1 if any change is detected
    pub fail_on_change: bool,
}

// ============================================================================
// Per-run Configuration
// ============================================================================

/// Configuration for one comparison run
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// Record shape of both files
    pub schema: Schema,
    /// Files to compare
    pub paths: ComparePaths,
    /// Indexing options
    pub indexing: IndexingConfig,
    /// Output options
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

/// Paths for a comparison
#[derive(Debug, Clone)]
pub struct ComparePaths {
    /// Older snapshot
    pub left: PathBuf,
    /// Newer snapshot
    pub right: PathBuf,
}

impl AnalyzeConfig {
    /// Options passed to both file indexings. The delimiter is fixed.
    #[must_use]
    pub const fn index_options(&self) -> IndexOptions {
        IndexOptions {
            delimiter: DEFAULT_DELIMITER,
            skip_rows: self.indexing.skip_rows,
        }
    }

    /// Effective output prefix.
    #[must_use]
    pub fn output_prefix(&self) -> &str {
        self.output
            .prefix
            .as_deref()
            .unwrap_or_else(|| self.schema.selector())
    }

    /// Directory plus prefix that the three output file names extend.
    #[must_use]
    pub fn output_base(&self) -> PathBuf {
        let prefix = self.output_prefix();
        match &self.output.directory {
            Some(dir) => dir.join(prefix),
            None => PathBuf::from(prefix),
        }
    }
}

// ============================================================================
// Builder for AnalyzeConfig
// ============================================================================

/// Builder for constructing an [`AnalyzeConfig`].
#[derive(Debug, Default)]
#[must_use]
pub struct AnalyzeConfigBuilder {
    schema: Option<Schema>,
    left: Option<PathBuf>,
    right: Option<PathBuf>,
    indexing: IndexingConfig,
    output: OutputConfig,
    behavior: BehaviorConfig,
}

impl AnalyzeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the builder with file-level defaults.
    pub fn from_app_config(app: &AppConfig) -> Self {
        Self {
            indexing: app.indexing.clone(),
            output: app.output.clone(),
            behavior: app.behavior.clone(),
            ..Self::default()
        }
    }

    pub const fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn left_path(mut self, path: PathBuf) -> Self {
        self.left = Some(path);
        self
    }

    pub fn right_path(mut self, path: PathBuf) -> Self {
        self.right = Some(path);
        self
    }

    pub const fn skip_rows(mut self, skip_rows: usize) -> Self {
        self.indexing.skip_rows = skip_rows;
        self
    }

    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.indexing.parallel = parallel;
        self
    }

    pub const fn suppress_output(mut self, suppress: bool) -> Self {
        self.output.suppress = suppress;
        self
    }

    pub fn prefix(mut self, prefix: Option<String>) -> Self {
        if prefix.is_some() {
            self.output.prefix = prefix;
        }
        self
    }

    pub fn output_directory(mut self, directory: Option<PathBuf>) -> Self {
        if directory.is_some() {
            self.output.directory = directory;
        }
        self
    }

    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.behavior.quiet = quiet;
        self
    }

    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.behavior.fail_on_change = fail;
        self
    }

    pub fn build(self) -> anyhow::Result<AnalyzeConfig> {
        let schema = self
            .schema
            .ok_or_else(|| anyhow::anyhow!("a schema (facility, gl, vendor, remit) is required"))?;
        let left = self
            .left
            .ok_or_else(|| anyhow::anyhow!("left file path is required"))?;
        let right = self
            .right
            .ok_or_else(|| anyhow::anyhow!("right file path is required"))?;

        Ok(AnalyzeConfig {
            schema,
            paths: ComparePaths { left, right },
            indexing: self.indexing,
            output: self.output,
            behavior: self.behavior,
        })
    }
}
