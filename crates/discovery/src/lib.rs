//! Discovery and disk ordering for pagewarm
//!
//! Walks a directory tree, resolves a disk-order key for every regular file
//! (first-extent physical address, or inode number when the filesystem
//! reports no extents) and sorts the result into an [`OrderedFileList`].

pub mod extent;
pub mod order;
pub mod resolver;
pub mod walker;

pub use extent::{default_mapper, DefaultMapper, ExtentMapper, NoExtents};
pub use order::{build_order, OrderedFileList};
pub use resolver::resolve_entry;
pub use walker::{Discovery, DiscoveryOutcome};
