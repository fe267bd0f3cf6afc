//! Order-key resolution for a single file

use crate::extent::ExtentMapper;
use pagewarm_core::{Error, FileEntry, KeySource, Result};
use std::fs::File;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

/// Build the [`FileEntry`] for the regular file at `path`.
///
/// The file is opened read-only for the extent query and closed before
/// returning; warming opens its own descriptor later. When the mapper reports
/// no extents, or a first extent at physical address 0, the inode number is
/// used as the key instead.
pub fn resolve_entry<M: ExtentMapper + ?Sized>(mapper: &M, path: &Path) -> Result<FileEntry> {
    let file = File::open(path).map_err(|e| Error::open(path, "extent query", e))?;

    let physical = mapper
        .first_extent(&file, path)
        .map_err(|e| Error::extent_query(path, e))?;

    let metadata = file.metadata().map_err(|e| Error::metadata(path, e))?;
    let size = metadata.len();

    let entry = match physical {
        Some(physical) => FileEntry::from_physical(path, size, physical, metadata.ino()),
        None => {
            tracing::warn!(path = %path.display(), "no exts found");
            FileEntry::new(path, size, metadata.ino(), KeySource::Inode)
        }
    };

    tracing::trace!(
        path = %path.display(),
        order_key = %entry.order_key(),
        source = entry.key_source().as_str(),
        size,
        "resolved"
    );
    Ok(entry)
}
