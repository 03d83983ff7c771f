//! Advisory run lock on the source directory.
//!
//! Two runs draining the same source would race for the same files, so a run
//! holds an exclusive flock on the source directory handle itself. No sidecar
//! file is created, which keeps the lock out of the listing.
//!
//! Notes:
//! - Unix only; directories cannot be opened as files on Windows, where the
//!   guard is a no-op.
//! - The lock is released when the DirLock guard is dropped.

use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;

#[cfg(unix)]
use fs2::FileExt;
#[cfg(unix)]
use std::fs::File;

/// RAII guard held while the source directory is locked.
pub struct DirLock {
    #[cfg(unix)]
    file: File,
    path: PathBuf,
}

impl DirLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            let _ = FileExt::unlock(&self.file);
        }
        trace!(path = %self.path.display(), "directory lock released");
    }
}

/// Try to lock `dir` without blocking.
/// Returns Ok(None) if another process already holds the lock.
#[cfg(unix)]
pub fn try_lock_dir(dir: &Path) -> io::Result<Option<DirLock>> {
    let file = File::open(dir)?;
    match file.try_lock_exclusive() {
        Ok(()) => {
            trace!(path = %dir.display(), "directory lock acquired");
            Ok(Some(DirLock {
                file,
                path: dir.to_path_buf(),
            }))
        }
        Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
            trace!(path = %dir.display(), "directory lock is held elsewhere");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(not(unix))]
pub fn try_lock_dir(dir: &Path) -> io::Result<Option<DirLock>> {
    trace!(path = %dir.display(), "directory locking unsupported on this platform");
    Ok(Some(DirLock {
        path: dir.to_path_buf(),
    }))
}
