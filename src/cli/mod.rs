//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.

mod analyze;

pub use analyze::run_analyze;

// Re-export config types used by handlers
pub use crate::config::AnalyzeConfig;
