//! Platform-specific helpers.
//! Hides OS differences behind a uniform API so the rest of the crate stays
//! platform-agnostic.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Open a log file for appending. A newly created file gets mode 0600 on Unix;
/// an existing file keeps whatever permissions an administrator gave it.
#[cfg(unix)]
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600) // applies on create only
        .open(path)
}

#[cfg(not(unix))]
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}
