//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

impl Error {
    /// Create an open error; `purpose` names the phase ("extent query", "warming", ...)
    #[must_use]
    pub fn open(path: impl Into<PathBuf>, purpose: &'static str, source: std::io::Error) -> Self {
        Error::Open {
            path: path.into(),
            purpose,
            source,
        }
    }

    /// Create an extent query error
    #[must_use]
    pub fn extent_query(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::ExtentQuery {
            path: path.into(),
            source,
        }
    }

    /// Create a metadata error
    #[must_use]
    pub fn metadata(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Metadata {
            path: path.into(),
            source,
        }
    }

    /// Create a transfer error with the failing syscall's error
    #[must_use]
    pub fn transfer(path: impl Into<PathBuf>, offset: u64, source: std::io::Error) -> Self {
        Error::Transfer {
            path: path.into(),
            offset,
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create a transfer error without an OS error (e.g. short transfer)
    #[must_use]
    pub fn transfer_message(
        path: impl Into<PathBuf>,
        offset: u64,
        message: impl Into<String>,
    ) -> Self {
        Error::Transfer {
            path: path.into(),
            offset,
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid root error
    #[must_use]
    pub fn invalid_root(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::InvalidRoot {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}
