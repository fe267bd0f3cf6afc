//! Portable loading through a user-space buffer

use super::{PageLoader, Transfer};
use pagewarm_core::constants::MAX_TRANSFER_CHUNK;
use pagewarm_core::{Error, FileEntry, Result};
use std::fs::File;
use std::io::{self, Read};

/// Reads the file into `io::sink()` for platforms without `sendfile`
#[derive(Debug, Clone, Copy)]
pub struct CopyLoader {
    max_chunk_bytes: u64,
}

impl CopyLoader {
    pub fn new(max_chunk_bytes: u64) -> Self {
        Self {
            max_chunk_bytes: max_chunk_bytes.clamp(1, MAX_TRANSFER_CHUNK),
        }
    }
}

impl Default for CopyLoader {
    fn default() -> Self {
        Self::new(MAX_TRANSFER_CHUNK)
    }
}

impl PageLoader for CopyLoader {
    fn load(&self, entry: &FileEntry) -> Result<Transfer> {
        let path = entry.path();
        let mut source = File::open(path).map_err(|e| Error::open(path, "warming", e))?;
        let mut sink = io::sink();

        let len = entry.size();
        let mut offset = 0u64;
        let mut chunks = 0u64;

        while offset < len {
            let count = (len - offset).min(self.max_chunk_bytes);
            let copied = io::copy(&mut (&mut source).take(count), &mut sink)
                .map_err(|e| Error::transfer(path, offset, e))?;
            if copied == 0 {
                return Err(Error::transfer_message(
                    path,
                    offset,
                    format!("file ended before its recorded size of {len} bytes"),
                ));
            }
            offset += copied;
            chunks += 1;
        }

        Ok(Transfer {
            chunks,
            bytes: offset,
        })
    }
}
