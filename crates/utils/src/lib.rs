//! Shared utilities for pagewarm
//!
//! Logging setup, the run-wide cancellation token, signal routing and the
//! sidecar hibernation state.

pub mod hibernate;
pub mod logging;
pub mod signals;
pub mod sync;

pub use hibernate::hibernate;
pub use signals::install_cancel_handler;
pub use sync::CancellationToken;
