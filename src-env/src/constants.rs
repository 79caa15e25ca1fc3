/// Environment variable naming the root directory for logger output
pub const OUTPUT_DIR_VAR: &str = "IOH_OUTPUT_DIR";

/// Subdirectory of the output root holding per-run log files
pub const LOGS_DIR: &str = "logs";
