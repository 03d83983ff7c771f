//! FileStore: the filesystem capability the selector and mover run against.
//!
//! `LocalStore` is the real implementation on top of std::fs. Tests swap in
//! `MemoryStore` (see `memory.rs`) to inject failures at a given phase.

use filetime::{set_file_mtime, FileTime};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::time::SystemTime;
use tracing::{trace, warn};

use crate::errors::ListError;

use super::entry::FileEntry;

pub trait FileStore {
    /// Immediate children of `dir`. Fails with `NotFound` / `NotADirectory`
    /// when `dir` is unusable.
    fn list(&self, dir: &Path) -> Result<Vec<FileEntry>, ListError>;

    /// Full content of the file at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate `path` and write `contents` to it.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    fn remove(&self, path: &Path) -> io::Result<()>;

    fn set_modified(&self, path: &Path, modified: SystemTime) -> io::Result<()>;
}

/// std::fs backed store.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }
}

impl FileStore for LocalStore {
    fn list(&self, dir: &Path) -> Result<Vec<FileEntry>, ListError> {
        // lstat: a symlink standing in for the source directory is refused.
        let meta = fs::symlink_metadata(dir)
            .map_err(|e| ListError::from_io("getting information about", dir, e))?;
        if !meta.is_dir() {
            return Err(ListError::NotADirectory(dir.to_path_buf()));
        }

        let read_dir =
            fs::read_dir(dir).map_err(|e| ListError::from_io("listing the content of", dir, e))?;

        let mut entries = Vec::new();
        for item in read_dir {
            let item = item.map_err(|e| ListError::Io {
                op: "listing the content of",
                path: dir.to_path_buf(),
                source: e,
            })?;
            let path = item.path();
            let Ok(name) = item.file_name().into_string() else {
                warn!(path = %path.display(), "Skipping entry with a non UTF-8 name");
                continue;
            };
            // Follow symlinks so a link to a directory counts as a directory.
            let meta = match fs::metadata(&path) {
                Ok(m) => m,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping entry whose metadata cannot be read");
                    continue;
                }
            };
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            entries.push(FileEntry {
                name,
                size: meta.len(),
                modified,
                is_dir: meta.is_dir(),
            });
        }

        // read_dir order is unspecified; name order keeps runs reproducible.
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        trace!(dir = %dir.display(), count = entries.len(), "listed directory");
        Ok(entries)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut f = File::create(path)?;
        f.write_all(contents)?;
        f.sync_all()
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn set_modified(&self, path: &Path, modified: SystemTime) -> io::Result<()> {
        set_file_mtime(path, FileTime::from_system_time(modified))
    }
}
