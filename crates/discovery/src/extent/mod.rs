//! Extent map queries
//!
//! Only the first extent of a file matters for ordering, so mappers answer a
//! single question: where on the device does this file start?

use std::fs::File;
use std::io;
use std::path::Path;

#[cfg(target_os = "linux")]
mod fiemap;

#[cfg(target_os = "linux")]
pub use fiemap::FiemapMapper;

/// Source of physical placement information for open files
pub trait ExtentMapper: Send + Sync {
    /// Physical address of the first extent of `file`.
    ///
    /// `Ok(None)` means the filesystem reported no extents (empty or sparse
    /// file, or a filesystem without extent mapping). Errors are reserved for
    /// queries the driver rejected.
    fn first_extent(&self, file: &File, path: &Path) -> io::Result<Option<u64>>;
}

impl<M: ExtentMapper + ?Sized> ExtentMapper for &M {
    fn first_extent(&self, file: &File, path: &Path) -> io::Result<Option<u64>> {
        (**self).first_extent(file, path)
    }
}

impl<M: ExtentMapper + ?Sized> ExtentMapper for Box<M> {
    fn first_extent(&self, file: &File, path: &Path) -> io::Result<Option<u64>> {
        (**self).first_extent(file, path)
    }
}

/// Mapper for platforms or filesystems without extent information
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExtents;

impl ExtentMapper for NoExtents {
    fn first_extent(&self, _file: &File, _path: &Path) -> io::Result<Option<u64>> {
        Ok(None)
    }
}

#[cfg(target_os = "linux")]
pub type DefaultMapper = FiemapMapper;

#[cfg(not(target_os = "linux"))]
pub type DefaultMapper = NoExtents;

/// The extent mapper for the current platform
pub fn default_mapper() -> DefaultMapper {
    DefaultMapper::default()
}
