//! Domain types shared by the discovery, ordering and warming stages

mod entry;
mod report;
mod summary;

pub use entry::{FileEntry, KeySource, OrderKey};
pub use report::{FileFailure, Phase, WarmOutcome, WarmReport};
pub use summary::{RunSummary, StopReason};
