//! In-memory FileStore with fault injection.
//!
//! Nodes are kept in insertion order so listings mimic a filesystem that
//! returns entries in creation order. A failure armed with [`MemoryStore::fail_on`]
//! fires every time the given phase touches the given path.

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::errors::{ListError, TransferPhase};

use super::entry::FileEntry;
use super::store::FileStore;

#[derive(Debug, Clone)]
struct Node {
    path: PathBuf,
    contents: Vec<u8>,
    modified: SystemTime,
    is_dir: bool,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    nodes: RefCell<Vec<Node>>,
    failures: RefCell<Vec<(TransferPhase, PathBuf)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.upsert(Node {
            path: path.into(),
            contents: Vec::new(),
            modified: SystemTime::UNIX_EPOCH,
            is_dir: true,
        });
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, contents: &[u8], modified: SystemTime) {
        self.upsert(Node {
            path: path.into(),
            contents: contents.to_vec(),
            modified,
            is_dir: false,
        });
    }

    /// Make every `phase` operation on `path` fail with an I/O error.
    pub fn fail_on(&self, phase: TransferPhase, path: impl Into<PathBuf>) {
        self.failures.borrow_mut().push((phase, path.into()));
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.nodes.borrow().iter().any(|n| n.path == path)
    }

    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.nodes
            .borrow()
            .iter()
            .find(|n| n.path == path && !n.is_dir)
            .map(|n| n.contents.clone())
    }

    fn upsert(&self, node: Node) {
        let mut nodes = self.nodes.borrow_mut();
        match nodes.iter_mut().find(|n| n.path == node.path) {
            Some(existing) => *existing = node,
            None => nodes.push(node),
        }
    }

    fn check(&self, phase: TransferPhase, path: &Path) -> io::Result<()> {
        let armed = self
            .failures
            .borrow()
            .iter()
            .any(|(p, target)| *p == phase && target == path);
        if armed {
            Err(io::Error::other(format!(
                "injected {phase} failure on {}",
                path.display()
            )))
        } else {
            Ok(())
        }
    }

    fn parent_is_dir(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) => self
                .nodes
                .borrow()
                .iter()
                .any(|n| n.is_dir && n.path == parent),
            None => false,
        }
    }
}

impl FileStore for MemoryStore {
    fn list(&self, dir: &Path) -> Result<Vec<FileEntry>, ListError> {
        let nodes = self.nodes.borrow();
        let Some(node) = nodes.iter().find(|n| n.path == dir) else {
            return Err(ListError::NotFound(dir.to_path_buf()));
        };
        if !node.is_dir {
            return Err(ListError::NotADirectory(dir.to_path_buf()));
        }
        let entries = nodes
            .iter()
            .filter(|n| n.path.parent() == Some(dir))
            .filter_map(|n| {
                let name = n.path.file_name()?.to_str()?.to_string();
                Some(FileEntry {
                    name,
                    size: n.contents.len() as u64,
                    modified: n.modified,
                    is_dir: n.is_dir,
                })
            })
            .collect();
        Ok(entries)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.check(TransferPhase::Read, path)?;
        self.contents(path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if !self.parent_is_dir(path) {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        if self.nodes.borrow().iter().any(|n| n.is_dir && n.path == path) {
            return Err(io::Error::from(io::ErrorKind::IsADirectory));
        }
        if let Err(e) = self.check(TransferPhase::Write, path) {
            // Leave half a file behind, like a disk filling up mid-write.
            let partial = &contents[..contents.len() / 2];
            self.add_file(path, partial, SystemTime::now());
            return Err(e);
        }
        self.add_file(path, contents, SystemTime::now());
        Ok(())
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        self.check(TransferPhase::Delete, path)?;
        let mut nodes = self.nodes.borrow_mut();
        match nodes.iter().position(|n| n.path == path && !n.is_dir) {
            Some(idx) => {
                nodes.remove(idx);
                Ok(())
            }
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }

    fn set_modified(&self, path: &Path, modified: SystemTime) -> io::Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        match nodes.iter_mut().find(|n| n.path == path) {
            Some(n) => {
                n.modified = modified;
                Ok(())
            }
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}
