//! Configuration validation for feed-analyzer.

use super::types::{AnalyzeConfig, AppConfig, OutputConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Resolve the number of leading rows to skip from command-line input.
///
/// `no_header` wins over an explicit count; a negative count is rejected.
pub fn resolve_skip_rows(
    explicit: Option<i64>,
    no_header: bool,
    fallback: usize,
) -> Result<usize, ConfigError> {
    if no_header {
        return Ok(0);
    }
    match explicit {
        None => Ok(fallback),
        Some(count) => usize::try_from(count).map_err(|_| ConfigError {
            field: "skip_rows".to_string(),
            message: format!("Number of rows to skip must be non-negative, got {count}"),
        }),
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.output.validate()
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref prefix) = self.prefix {
            if prefix.trim().is_empty() {
                errors.push(ConfigError {
                    field: "output.prefix".to_string(),
                    message: "Output prefix must not be empty".to_string(),
                });
            } else if prefix.contains(['/', '\\']) {
                errors.push(ConfigError {
                    field: "output.prefix".to_string(),
                    message: format!(
                        "Output prefix '{prefix}' must be a file name; use output.directory for paths"
                    ),
                });
            }
        }

        if let Some(ref dir) = self.directory {
            if !dir.is_dir() {
                errors.push(ConfigError {
                    field: "output.directory".to_string(),
                    message: format!("Output directory does not exist: {}", dir.display()),
                });
            }
        }

        errors
    }
}

impl Validatable for AnalyzeConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.paths.left.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "paths.left".to_string(),
                message: "Left file path is required".to_string(),
            });
        }
        if self.paths.right.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "paths.right".to_string(),
                message: "Right file path is required".to_string(),
            });
        }

        // Output settings only matter when files are written.
        if !self.output.suppress {
            errors.extend(self.output.validate());
        }

        errors
    }
}
