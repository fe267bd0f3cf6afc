//! Zero-copy loading with `sendfile(2)`

use super::{PageLoader, Transfer};
use pagewarm_core::constants::{DISCARD_SINK_PATH, MAX_TRANSFER_CHUNK};
use pagewarm_core::{Error, FileEntry, Result};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::AsRawFd;

/// Moves file data to the discard sink inside the kernel
#[derive(Debug, Clone, Copy)]
pub struct SendfileLoader {
    max_chunk_bytes: u64,
}

impl SendfileLoader {
    pub fn new(max_chunk_bytes: u64) -> Self {
        Self {
            max_chunk_bytes: max_chunk_bytes.clamp(1, MAX_TRANSFER_CHUNK),
        }
    }
}

impl Default for SendfileLoader {
    fn default() -> Self {
        Self::new(MAX_TRANSFER_CHUNK)
    }
}

impl PageLoader for SendfileLoader {
    fn load(&self, entry: &FileEntry) -> Result<Transfer> {
        let path = entry.path();
        let source = File::open(path).map_err(|e| Error::open(path, "warming", e))?;
        let sink = OpenOptions::new()
            .write(true)
            .open(DISCARD_SINK_PATH)
            .map_err(|e| Error::open(DISCARD_SINK_PATH, "discard sink", e))?;

        let len = entry.size();
        let mut offset: libc::off_t = 0;
        let mut chunks = 0u64;

        while (offset as u64) < len {
            let remaining = len - offset as u64;
            let count = remaining.min(self.max_chunk_bytes) as usize;

            // SAFETY: both descriptors are open for the duration of the call
            // and `offset` is a valid, exclusively borrowed off_t.
            let sent = unsafe {
                libc::sendfile(sink.as_raw_fd(), source.as_raw_fd(), &mut offset, count)
            };

            if sent < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(Error::transfer(path, offset as u64, err));
            }
            if sent == 0 {
                return Err(Error::transfer_message(
                    path,
                    offset as u64,
                    format!("file ended before its recorded size of {len} bytes"),
                ));
            }
            chunks += 1;
        }

        Ok(Transfer {
            chunks,
            bytes: offset as u64,
        })
    }
}
