//! Run configuration for pagewarm
//!
//! `WarmConfig` is immutable after construction and is shared read-only by
//! the discovery and warming stages.

use pagewarm_core::constants::MAX_TRANSFER_CHUNK;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for one warming run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarmConfig {
    /// Directory whose regular files are warmed
    pub root: PathBuf,

    /// Number of warming workers
    pub workers: usize,

    /// Upper bound on bytes moved by a single transfer call
    pub max_chunk_bytes: u64,

    /// Deadline for the warming phase; workers stop claiming once it passes
    #[serde(default)]
    pub timeout: Option<Duration>,

    /// Abort on the first failure instead of collecting failures
    #[serde(default)]
    pub fail_fast: bool,

    /// Stay alive after completion until a termination signal arrives
    #[serde(default)]
    pub hibernate: bool,
}

impl WarmConfig {
    /// Configuration for `root` with every other setting at its default
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            workers: default_workers(),
            max_chunk_bytes: MAX_TRANSFER_CHUNK,
            timeout: None,
            fail_fast: false,
            hibernate: false,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// One worker per available CPU
pub fn default_workers() -> usize {
    num_cpus::get().max(1)
}
