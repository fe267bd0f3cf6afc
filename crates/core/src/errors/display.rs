//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Traversal { path, message, .. } => {
                write!(f, "failed to traverse '{}': {message}", path.display())
            }
            Error::Open {
                path,
                purpose,
                source,
            } => {
                write!(
                    f,
                    "failed to open '{}' for {purpose}: {source}",
                    path.display()
                )
            }
            Error::ExtentQuery { path, source } => {
                write!(f, "fiemap error for '{}': {source}", path.display())
            }
            Error::Metadata { path, source } => {
                write!(f, "stat error for '{}': {source}", path.display())
            }
            Error::Transfer {
                path,
                offset,
                message,
                ..
            } => {
                write!(
                    f,
                    "could not sendfile '{}' at offset {offset}: {message}",
                    path.display()
                )
            }
            Error::InvalidRoot { path, message } => {
                write!(f, "invalid root '{}': {message}", path.display())
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
        }
    }
}
