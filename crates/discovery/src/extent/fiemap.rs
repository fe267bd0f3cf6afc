//! `FS_IOC_FIEMAP` extent mapping for Linux

use super::ExtentMapper;
use pagewarm_core::constants::FIEMAP_EXTENT_COUNT;
use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::Path;

// _IOWR('f', 11, struct fiemap)
const FS_IOC_FIEMAP: u32 = 0xC020_660B;
const FIEMAP_FLAG_SYNC: u32 = 0x0000_0001;
const FIEMAP_MAX_OFFSET: u64 = u64::MAX;

/// Mirrors `struct fiemap` from linux/fiemap.h
#[allow(dead_code)]
#[repr(C)]
#[derive(Debug, Default)]
struct FiemapHeader {
    fm_start: u64,
    fm_length: u64,
    fm_flags: u32,
    fm_mapped_extents: u32,
    fm_extent_count: u32,
    fm_reserved: u32,
}

/// Mirrors `struct fiemap_extent` from linux/fiemap.h
#[allow(dead_code)]
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct FiemapExtent {
    fe_logical: u64,
    fe_physical: u64,
    fe_length: u64,
    fe_reserved64: [u64; 2],
    fe_flags: u32,
    fe_reserved: [u32; 3],
}

#[repr(C)]
struct FiemapRequest {
    header: FiemapHeader,
    extents: [FiemapExtent; FIEMAP_EXTENT_COUNT as usize],
}

impl FiemapRequest {
    fn new(flags: u32) -> Self {
        Self {
            header: FiemapHeader {
                fm_start: 0,
                fm_length: FIEMAP_MAX_OFFSET,
                fm_flags: flags,
                fm_extent_count: FIEMAP_EXTENT_COUNT,
                ..Default::default()
            },
            extents: [FiemapExtent::default(); FIEMAP_EXTENT_COUNT as usize],
        }
    }
}

/// Extent mapper backed by the `FS_IOC_FIEMAP` ioctl
#[derive(Debug, Clone, Copy, Default)]
pub struct FiemapMapper;

impl FiemapMapper {
    fn query(file: &File, flags: u32) -> io::Result<FiemapRequest> {
        let mut request = FiemapRequest::new(flags);

        // SAFETY: `request` is a properly laid out `struct fiemap` followed by
        // room for `fm_extent_count` extents, and outlives the call.
        let rc = unsafe {
            libc::ioctl(
                file.as_raw_fd(),
                FS_IOC_FIEMAP as _,
                &mut request as *mut FiemapRequest,
            )
        };

        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(request)
    }
}

impl ExtentMapper for FiemapMapper {
    fn first_extent(&self, file: &File, path: &Path) -> io::Result<Option<u64>> {
        let result = match Self::query(file, FIEMAP_FLAG_SYNC) {
            // Driver rejected the sync flag; map without flushing
            Err(err) if err.raw_os_error() == Some(libc::EBADR) => Self::query(file, 0),
            other => other,
        };

        let request = match result {
            Ok(request) => request,
            Err(err) => {
                return match err.raw_os_error() {
                    // Filesystem has no extent mapping (tmpfs, NFS, ...)
                    Some(libc::EOPNOTSUPP) | Some(libc::ENOTTY) => {
                        tracing::trace!(path = %path.display(), "fiemap unsupported");
                        Ok(None)
                    }
                    _ => Err(err),
                };
            }
        };

        let mapped = request.header.fm_mapped_extents.min(FIEMAP_EXTENT_COUNT);
        if mapped == 0 {
            return Ok(None);
        }

        let first = request.extents[0];
        tracing::trace!(
            path = %path.display(),
            mapped,
            logical = first.fe_logical,
            physical = first.fe_physical,
            length = first.fe_length,
            "fiemap"
        );
        Ok(Some(first.fe_physical))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_header_layout_matches_kernel() {
        assert_eq!(std::mem::size_of::<FiemapHeader>(), 32);
        assert_eq!(std::mem::size_of::<FiemapExtent>(), 56);
    }

    #[test]
    fn test_request_asks_for_bounded_extent_count() {
        let request = FiemapRequest::new(FIEMAP_FLAG_SYNC);
        assert_eq!(request.header.fm_extent_count, 32);
        assert_eq!(request.header.fm_flags, FIEMAP_FLAG_SYNC);
        assert_eq!(request.header.fm_length, u64::MAX);
    }

    #[test]
    fn test_empty_file_has_no_extents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty");
        let file = File::create(&path).unwrap();
        assert_eq!(FiemapMapper.first_extent(&file, &path).unwrap(), None);
    }

    #[test]
    fn test_written_file_does_not_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data");
        let mut file = File::create(&path).unwrap();
        file.write_all(&[7u8; 16 * 1024]).unwrap();
        file.sync_all().unwrap();

        // Either a physical address or None on filesystems without fiemap
        let reader = File::open(&path).unwrap();
        FiemapMapper.first_extent(&reader, &path).unwrap();
    }
}
