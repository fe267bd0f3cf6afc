//! Discovered files and their disk-order keys

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Sort key approximating a file's position on the block device
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderKey(u64);

impl OrderKey {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderKey {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an order key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    /// Physical address of the file's first extent
    Extent,
    /// Inode number, used when no usable extent was reported
    Inode,
}

impl KeySource {
    pub fn as_str(self) -> &'static str {
        match self {
            KeySource::Extent => "extent",
            KeySource::Inode => "inode",
        }
    }
}

/// One regular file found during traversal
///
/// Entries are immutable once built. `size` is captured at discovery and
/// bounds the read loop; it is not re-validated before warming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    path: PathBuf,
    size: u64,
    order_key: OrderKey,
    key_source: KeySource,
}

impl FileEntry {
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        size: u64,
        order_key: impl Into<OrderKey>,
        key_source: KeySource,
    ) -> Self {
        Self {
            path: path.into(),
            size,
            order_key: order_key.into(),
            key_source,
        }
    }

    /// Build an entry keyed by a first-extent physical address, falling back
    /// to the inode number when the address is zero.
    #[must_use]
    pub fn from_physical(path: impl Into<PathBuf>, size: u64, physical: u64, ino: u64) -> Self {
        if physical == 0 {
            Self::new(path, size, ino, KeySource::Inode)
        } else {
            Self::new(path, size, physical, KeySource::Extent)
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub fn order_key(&self) -> OrderKey {
        self.order_key
    }

    #[must_use]
    pub fn key_source(&self) -> KeySource {
        self.key_source
    }
}
