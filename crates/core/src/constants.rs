/// Constants used throughout the pagewarm codebase
// Environment variable names
pub const PAGEWARM_LOG_VAR: &str = "PAGEWARM_LOG";
pub const PAGEWARM_WORKERS_VAR: &str = "PAGEWARM_WORKERS";
pub const PAGEWARM_TIMEOUT_VAR: &str = "PAGEWARM_TIMEOUT_SECS";
pub const PAGEWARM_FAIL_FAST_VAR: &str = "PAGEWARM_FAIL_FAST";
pub const PAGEWARM_HIBERNATE_VAR: &str = "PAGEWARM_HIBERNATE";

// Only the first extent orders a file, so the fiemap request stays small
pub const FIEMAP_EXTENT_COUNT: u32 = 32;

// Per-call transfer ceiling (SSIZE_MAX)
pub const MAX_TRANSFER_CHUNK: u64 = isize::MAX as u64;

// Discard destination for warming reads
pub const DISCARD_SINK_PATH: &str = "/dev/null";
