//! Disk-order sorting of discovered files

use pagewarm_core::FileEntry;

/// Discovered files sorted ascending by order key
///
/// Ties keep no particular order. The list is read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedFileList(Vec<FileEntry>);

impl OrderedFileList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[FileEntry] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<FileEntry> {
        self.0
    }

    /// Sum of the recorded sizes of all entries
    pub fn total_bytes(&self) -> u64 {
        self.0.iter().map(FileEntry::size).sum()
    }

    /// True when keys never decrease along the list
    pub fn is_monotonic(&self) -> bool {
        self.0
            .windows(2)
            .all(|pair| pair[0].order_key() <= pair[1].order_key())
    }
}

impl IntoIterator for OrderedFileList {
    type Item = FileEntry;
    type IntoIter = std::vec::IntoIter<FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedFileList {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Sort `entries` ascending by order key, in place
pub fn build_order(mut entries: Vec<FileEntry>) -> OrderedFileList {
    entries.sort_unstable_by_key(FileEntry::order_key);
    let ordered = OrderedFileList(entries);
    debug_assert!(ordered.is_monotonic());
    ordered
}
