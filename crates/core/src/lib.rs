//! Core domain types, errors, and constants for `pagewarm`.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias covering every failure
//!   mode of the pipeline (traversal, open, extent query, metadata, transfer).
//! - **`types`**: `FileEntry` and its `OrderKey`, per-file `WarmReport` /
//!   `FileFailure` records and the aggregate `RunSummary`.
//! - **`constants`**: environment variable names and syscall limits.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, ErrorKind, Result},
    types::*,
};
