//! Process exit status for a finished run

use pagewarm_core::{RunSummary, StopReason};
use std::process::ExitCode;

/// Every discovered file was warmed
pub const EXIT_OK: u8 = 0;
/// At least one file failed, or the run aborted in fail-fast mode
pub const EXIT_FAILURES: u8 = 1;
/// Interrupted by a signal or the deadline
pub const EXIT_INTERRUPTED: u8 = 3;

#[must_use]
pub fn exit_status(summary: &RunSummary) -> u8 {
    match summary.stop_reason {
        Some(StopReason::Cancelled | StopReason::TimedOut) => EXIT_INTERRUPTED,
        Some(StopReason::FailFast) => EXIT_FAILURES,
        None if summary.failures.is_empty() => EXIT_OK,
        None => EXIT_FAILURES,
    }
}

#[must_use]
pub fn exit_code(summary: &RunSummary) -> ExitCode {
    ExitCode::from(exit_status(summary))
}
