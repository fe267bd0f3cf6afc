//! Conversion implementations for error types

use super::types::Error;
use std::path::PathBuf;

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        let path = error.path().map(PathBuf::from).unwrap_or_default();
        let message = error.to_string();
        Error::Traversal {
            path,
            message,
            source: error.into_io_error(),
        }
    }
}
