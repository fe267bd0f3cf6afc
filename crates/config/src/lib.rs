//! Configuration management for pagewarm
//!
//! Explicit settings are layered over `PAGEWARM_*` environment variables and
//! validated into an immutable [`WarmConfig`].

pub mod config;
pub mod loader;

pub use config::{default_workers, WarmConfig};
pub use loader::ConfigLoader;
