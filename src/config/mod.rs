//! Configuration module for feed-analyzer.
//!
//! This module provides:
//! - Per-run configuration ([`AnalyzeConfig`]) built from CLI arguments
//! - File-level defaults ([`AppConfig`]) loaded from an optional YAML file
//! - Validation of both before any feed file is opened
//!
//! # Configuration File
//!
//! Place a `.feed-analyzer.yaml` file in your project root or
//! `~/.config/feed-analyzer/`:
//!
//! ```yaml
//! indexing:
//!   skip_rows: 2
//!   parallel: true
//! output:
//!   directory: ./reports
//! behavior:
//!   fail_on_change: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{CONFIG_PATH_ENV, DEFAULT_DELIMITER, DEFAULT_SKIP_ROWS};
pub use types::{
    AnalyzeConfig, AnalyzeConfigBuilder, AppConfig, BehaviorConfig, ComparePaths,
    IndexingConfig, OutputConfig,
};
pub use validation::{resolve_skip_rows, ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the [`AppConfig`] file format.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
