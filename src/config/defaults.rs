//! Default values shared by the library and the command line.

/// Field delimiter of feed exports (tab-delimited files).
pub const DEFAULT_DELIMITER: u8 = b'\t';

/// Leading rows skipped when none is configured (the header row).
pub const DEFAULT_SKIP_ROWS: usize = 1;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "FEED_ANALYZER_CONFIG";
