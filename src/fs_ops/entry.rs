//! Value types shared by the selector and the mover.

use std::time::SystemTime;

/// One child of the source directory, as seen when the run started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub modified: SystemTime,
    pub is_dir: bool,
}

impl FileEntry {
    pub fn file(name: impl Into<String>, size: u64, modified: SystemTime) -> Self {
        Self {
            name: name.into(),
            size,
            modified,
            is_dir: false,
        }
    }
}

/// Which children to pick and in what order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionCriteria {
    /// Regular expression searched anywhere in the file name; empty matches all.
    pub filter_pattern: String,
    /// Sort by modification time ascending before moving.
    pub older_first: bool,
}

impl SelectionCriteria {
    pub fn new(filter_pattern: impl Into<String>, older_first: bool) -> Self {
        Self {
            filter_pattern: filter_pattern.into(),
            older_first,
        }
    }
}

/// Ordered candidates produced by the selector. The mover takes it by value
/// and walks it once, front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPlan {
    entries: Vec<FileEntry>,
}

impl TransferPlan {
    pub fn new(entries: Vec<FileEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.size))
    }
}

impl IntoIterator for TransferPlan {
    type Item = FileEntry;
    type IntoIter = std::vec::IntoIter<FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
