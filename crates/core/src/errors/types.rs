//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for pagewarm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for pagewarm operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A directory entry could not be enumerated
    Traversal {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// A file could not be opened for extent query or warming
    Open {
        path: PathBuf,
        purpose: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The device driver refused or failed the extent request
    ExtentQuery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File metadata (inode number, size) could not be read
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The zero-copy transfer failed mid-file
    Transfer {
        path: PathBuf,
        offset: u64,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The root path is missing or is not a directory
    InvalidRoot { path: PathBuf, message: String },

    /// Configuration errors
    Configuration { message: String },
}
