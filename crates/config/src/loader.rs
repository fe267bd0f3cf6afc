//! Configuration loader for pagewarm
//!
//! Resolves settings from three layers, highest priority first: values set
//! explicitly on the loader (CLI flags), `PAGEWARM_*` environment variables,
//! and built-in defaults.

use crate::config::{default_workers, WarmConfig};
use pagewarm_core::{
    constants::{
        MAX_TRANSFER_CHUNK, PAGEWARM_FAIL_FAST_VAR, PAGEWARM_HIBERNATE_VAR, PAGEWARM_TIMEOUT_VAR,
        PAGEWARM_WORKERS_VAR,
    },
    Error, Result,
};
use std::path::PathBuf;
use std::time::Duration;

/// Builder that layers explicit values over the environment
#[derive(Debug, Default, Clone)]
pub struct ConfigLoader {
    root: Option<PathBuf>,
    workers: Option<usize>,
    max_chunk_bytes: Option<u64>,
    timeout: Option<Duration>,
    fail_fast: Option<bool>,
    hibernate: Option<bool>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory to warm
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn max_chunk_bytes(mut self, bytes: u64) -> Self {
        self.max_chunk_bytes = Some(bytes);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = Some(enabled);
        self
    }

    pub fn hibernate(mut self, enabled: bool) -> Self {
        self.hibernate = Some(enabled);
        self
    }

    /// Fill unset values from the process environment
    pub fn with_env(self) -> Result<Self> {
        self.with_env_source(|key| std::env::var(key).ok())
    }

    /// Fill unset values from `lookup`, which maps variable names to values
    pub fn with_env_source<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.workers.is_none() {
            if let Some(raw) = lookup(PAGEWARM_WORKERS_VAR) {
                self.workers = Some(parse_number(PAGEWARM_WORKERS_VAR, &raw)?);
            }
        }
        if self.timeout.is_none() {
            if let Some(raw) = lookup(PAGEWARM_TIMEOUT_VAR) {
                let secs: u64 = parse_number(PAGEWARM_TIMEOUT_VAR, &raw)?;
                self.timeout = Some(Duration::from_secs(secs));
            }
        }
        if self.fail_fast.is_none() {
            if let Some(raw) = lookup(PAGEWARM_FAIL_FAST_VAR) {
                self.fail_fast = Some(parse_bool(PAGEWARM_FAIL_FAST_VAR, &raw)?);
            }
        }
        if self.hibernate.is_none() {
            if let Some(raw) = lookup(PAGEWARM_HIBERNATE_VAR) {
                self.hibernate = Some(parse_bool(PAGEWARM_HIBERNATE_VAR, &raw)?);
            }
        }
        Ok(self)
    }

    /// Validate and produce the final configuration
    pub fn build(self) -> Result<WarmConfig> {
        let root = self
            .root
            .filter(|r| !r.as_os_str().is_empty())
            .ok_or_else(|| Error::configuration("a root path is required"))?;

        let workers = self.workers.unwrap_or_else(default_workers);
        if workers == 0 {
            return Err(Error::configuration("worker count must be at least 1"));
        }

        let max_chunk_bytes = self.max_chunk_bytes.unwrap_or(MAX_TRANSFER_CHUNK);
        if max_chunk_bytes == 0 || max_chunk_bytes > MAX_TRANSFER_CHUNK {
            return Err(Error::configuration(format!(
                "transfer chunk size must be between 1 and {MAX_TRANSFER_CHUNK} bytes"
            )));
        }

        if let Some(timeout) = self.timeout {
            if timeout.is_zero() {
                return Err(Error::configuration("timeout must be greater than zero"));
            }
        }

        Ok(WarmConfig {
            root,
            workers,
            max_chunk_bytes,
            timeout: self.timeout,
            fail_fast: self.fail_fast.unwrap_or(false),
            hibernate: self.hibernate.unwrap_or(false),
        })
    }
}

fn parse_number<T: std::str::FromStr>(variable: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| {
        Error::configuration(format!("{variable} must be a non-negative integer, got '{raw}'"))
    })
}

fn parse_bool(variable: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::configuration(format!(
            "{variable} must be a boolean, got '{raw}'"
        ))),
    }
}
