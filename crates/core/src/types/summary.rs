//! Aggregate result of a run

use super::report::{FileFailure, WarmOutcome};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Why warming stopped before the queue was drained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A termination signal was received
    Cancelled,
    /// The global deadline passed
    TimedOut,
    /// A failure was hit in fail-fast mode
    FailFast,
}

/// Counters and failures for one discovery + warming pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Regular files that produced an entry
    pub discovered: usize,
    /// Symlinks and special files left alone
    pub skipped: usize,
    pub warmed: usize,
    pub bytes_warmed: u64,
    pub chunks: u64,
    /// Queued files no worker claimed
    pub unclaimed: usize,
    pub failures: Vec<FileFailure>,
    pub stop_reason: Option<StopReason>,
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
}

impl RunSummary {
    /// Fold one per-file outcome into the totals
    pub fn record(&mut self, outcome: WarmOutcome) {
        match outcome {
            Ok(report) => {
                self.warmed += 1;
                self.bytes_warmed += report.bytes;
                self.chunks += report.chunks;
            }
            Err(failure) => self.failures.push(failure),
        }
    }

    /// True when every discovered file was warmed
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.unclaimed == 0
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
