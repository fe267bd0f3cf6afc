//! Serializable classification of errors for per-file failure records

use super::types::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error taxonomy of the warming pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Traversal,
    Open,
    ExtentQuery,
    Metadata,
    Transfer,
    Other,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Traversal => "traversal",
            ErrorKind::Open => "open",
            ErrorKind::ExtentQuery => "extent_query",
            ErrorKind::Metadata => "metadata",
            ErrorKind::Transfer => "transfer",
            ErrorKind::Other => "other",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Classify this error within the pipeline taxonomy
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Traversal { .. } => ErrorKind::Traversal,
            Error::Open { .. } => ErrorKind::Open,
            Error::ExtentQuery { .. } => ErrorKind::ExtentQuery,
            Error::Metadata { .. } => ErrorKind::Metadata,
            Error::Transfer { .. } => ErrorKind::Transfer,
            _ => ErrorKind::Other,
        }
    }

    /// Path the error refers to, when it has one
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::Traversal { path, .. }
            | Error::Open { path, .. }
            | Error::ExtentQuery { path, .. }
            | Error::Metadata { path, .. }
            | Error::Transfer { path, .. }
            | Error::InvalidRoot { path, .. } => Some(path),
            Error::Configuration { .. } => None,
        }
    }
}
