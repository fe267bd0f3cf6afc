//! Finite work distribution for the warming pool

use crossbeam::channel::{self, Receiver};
use pagewarm_core::FileEntry;
use pagewarm_discovery::OrderedFileList;

/// Fully pre-loaded queue of files to warm
///
/// The channel is filled with every entry in disk order and its sender is
/// dropped before any worker claims, so an empty queue is also a closed one:
/// [`WorkQueue::claim`] never blocks and `None` means no more work, ever.
#[derive(Debug, Clone)]
pub struct WorkQueue {
    rx: Receiver<FileEntry>,
    capacity: usize,
}

impl WorkQueue {
    pub fn preload(files: OrderedFileList) -> Self {
        let capacity = files.len();
        let (tx, rx) = channel::bounded(capacity.max(1));
        for entry in files {
            // Capacity equals the file count and `rx` is alive, so this never blocks or fails
            let sent = tx.send(entry);
            debug_assert!(sent.is_ok());
        }
        drop(tx);
        Self { rx, capacity }
    }

    /// Take the next entry in disk order
    pub fn claim(&self) -> Option<FileEntry> {
        self.rx.recv().ok()
    }

    /// Entries not yet claimed
    pub fn remaining(&self) -> usize {
        self.rx.len()
    }

    /// Number of entries the queue was loaded with
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewarm_core::KeySource;
    use pagewarm_discovery::build_order;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::thread;

    fn list(keys: &[u64]) -> OrderedFileList {
        build_order(
            keys.iter()
                .enumerate()
                .map(|(i, k)| FileEntry::new(format!("/q/{i}"), 1, *k, KeySource::Extent))
                .collect(),
        )
    }

    #[test]
    fn test_empty_queue_is_closed() {
        let queue = WorkQueue::preload(list(&[]));
        assert_eq!(queue.capacity(), 0);
        assert!(queue.claim().is_none());
    }

    #[test]
    fn test_claims_follow_disk_order() {
        let queue = WorkQueue::preload(list(&[500, 100, 300]));
        let claimed: Vec<u64> = std::iter::from_fn(|| queue.claim())
            .map(|e| e.order_key().get())
            .collect();
        assert_eq!(claimed, vec![100, 300, 500]);
        assert_eq!(queue.remaining(), 0);
        assert!(queue.claim().is_none());
    }

    #[test]
    fn test_concurrent_claims_are_exclusive() {
        let keys: Vec<u64> = (0..1000).rev().collect();
        let queue = WorkQueue::preload(list(&keys));
        let seen = Mutex::new(Vec::new());

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    while let Some(entry) = queue.claim() {
                        seen.lock().unwrap().push(entry.path().to_path_buf());
                    }
                });
            }
        });

        let seen = seen.into_inner().unwrap();
        let unique: HashSet<PathBuf> = seen.iter().cloned().collect();
        assert_eq!(seen.len(), 1000);
        assert_eq!(unique.len(), 1000);
        assert_eq!(queue.remaining(), 0);
    }
}
