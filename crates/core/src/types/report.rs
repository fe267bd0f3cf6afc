//! Per-file results of a warming run

use super::entry::{FileEntry, KeySource, OrderKey};
use crate::errors::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Successful warm of a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarmReport {
    pub path: PathBuf,
    pub order_key: OrderKey,
    pub key_source: KeySource,
    /// Number of transfer calls it took to cover the file
    pub chunks: u64,
    pub bytes: u64,
}

impl WarmReport {
    #[must_use]
    pub fn new(entry: &FileEntry, chunks: u64, bytes: u64) -> Self {
        Self {
            path: entry.path().to_path_buf(),
            order_key: entry.order_key(),
            key_source: entry.key_source(),
            chunks,
            bytes,
        }
    }
}

impl fmt::Display for WarmReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done: {} @[block={} chunks={}]",
            self.path.display(),
            self.order_key,
            self.chunks
        )
    }
}

/// Pipeline stage a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Discovery,
    Warm,
}

/// A file that could not be discovered or warmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub phase: Phase,
    pub kind: ErrorKind,
    pub message: String,
}

impl FileFailure {
    /// Record `error` against `path`; the error's own path wins when it has one
    #[must_use]
    pub fn new(phase: Phase, path: impl Into<PathBuf>, error: &Error) -> Self {
        let path = error
            .path()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| path.into());
        Self {
            path,
            phase,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed: {} ({}): {}", self.path.display(), self.kind, self.message)
    }
}

/// Outcome of warming one file
pub type WarmOutcome = std::result::Result<WarmReport, FileFailure>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_report_line_format() {
        let entry = FileEntry::new("/srv/data/a.bin", 4096, 1200u64, KeySource::Extent);
        let report = WarmReport::new(&entry, 1, 4096);
        assert_eq!(report.to_string(), "Done: /srv/data/a.bin @[block=1200 chunks=1]");
    }

    #[test]
    fn test_failure_prefers_error_path() {
        let err = Error::open("/srv/data/gone", "warming", io::Error::from(io::ErrorKind::NotFound));
        let failure = FileFailure::new(Phase::Warm, "/elsewhere", &err);
        assert_eq!(failure.path, PathBuf::from("/srv/data/gone"));
        assert_eq!(failure.kind, ErrorKind::Open);
        assert_eq!(failure.phase, Phase::Warm);
    }

    #[test]
    fn test_failure_uses_given_path_for_pathless_error() {
        let err = Error::configuration("boom");
        let failure = FileFailure::new(Phase::Discovery, "/srv/x", &err);
        assert_eq!(failure.path, PathBuf::from("/srv/x"));
        assert_eq!(failure.kind, ErrorKind::Other);
    }
}
