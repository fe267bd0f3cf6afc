//! Per-file page cache loading
//!
//! A loader pushes every byte of a file through the kernel's buffered read
//! path into a discard sink, one bounded transfer call ("chunk") at a time.

use pagewarm_core::{FileEntry, Result};

mod copy;
#[cfg(target_os = "linux")]
mod sendfile;

pub use copy::CopyLoader;
#[cfg(target_os = "linux")]
pub use sendfile::SendfileLoader;

/// Totals for one fully transferred file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transfer {
    /// Transfer calls needed to reach the recorded size
    pub chunks: u64,
    pub bytes: u64,
}

/// Reads a whole file so its pages end up cached
pub trait PageLoader: Send + Sync {
    /// Transfer `entry.size()` bytes of the file into a discard sink.
    ///
    /// Partial progress is discarded on error.
    fn load(&self, entry: &FileEntry) -> Result<Transfer>;
}

impl<L: PageLoader + ?Sized> PageLoader for &L {
    fn load(&self, entry: &FileEntry) -> Result<Transfer> {
        (**self).load(entry)
    }
}

impl<L: PageLoader + ?Sized> PageLoader for Box<L> {
    fn load(&self, entry: &FileEntry) -> Result<Transfer> {
        (**self).load(entry)
    }
}

#[cfg(target_os = "linux")]
pub type DefaultLoader = SendfileLoader;

#[cfg(not(target_os = "linux"))]
pub type DefaultLoader = CopyLoader;

/// The zero-copy loader where the platform has one, bounded per call by
/// `max_chunk_bytes`
pub fn default_loader(max_chunk_bytes: u64) -> DefaultLoader {
    DefaultLoader::new(max_chunk_bytes)
}
