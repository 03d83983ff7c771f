//! I/O error helpers.
//!
//! Turns a bare io::Error into a message naming the operation and path, plus a
//! short hint for the OS errors a move run typically hits (full disk,
//! read-only target, missing permissions).
//!
//! Usage:
//!   // in functions returning anyhow::Result<_>
//!   fs::metadata(dir).map_err(io_error_with_help("inspect target", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Hint keyed on the raw OS error code.
#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        libc::EACCES | libc::EPERM => "permission denied; check ownership and write permissions",
        libc::ENOENT => "path not found; verify it exists",
        libc::ENOTDIR => "a path component is not a directory",
        libc::EISDIR => "path is a directory, expected a file",
        libc::ENOSPC => "insufficient space on device",
        libc::EDQUOT => "disk quota exceeded",
        libc::EROFS => "read-only filesystem; cannot write here",
        libc::EBUSY => "resource busy; ensure no other process is using it",
        libc::ENAMETOOLONG => "filename or path too long",
        libc::EMFILE => "process file descriptor limit reached",
        libc::EIO => "low-level I/O error; check the device",
        _ => return None,
    };
    Some(hint)
}

#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        5 => "access denied; check permissions",
        2 | 3 => "path not found; verify it exists",
        32 => "sharing violation; file is in use",
        112 => "insufficient disk space",
        19 => "write protected / read-only media",
        206 => "filename or path too long",
        _ => return None,
    };
    Some(hint)
}

#[cfg(not(any(unix, windows)))]
fn os_hint(_code: i32) -> Option<&'static str> {
    None
}

/// Hint keyed on the portable error kind, used when no OS code is attached.
fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => {
            Some("permission denied; check ownership and write permissions")
        }
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        io::ErrorKind::WriteZero | io::ErrorKind::StorageFull => {
            Some("insufficient space on device")
        }
        _ => None,
    }
}

/// Format "<op> '<path>': <error>" with a hint and the OS code when known.
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    match e.raw_os_error() {
        Some(code) => {
            if let Some(hint) = os_hint(code) {
                msg.push_str(" (");
                msg.push_str(hint);
                msg.push(')');
            }
            msg.push_str(&format!(" [os code: {code}]"));
        }
        None => {
            if let Some(hint) = kind_hint(e.kind()) {
                msg.push_str(" (");
                msg.push_str(hint);
                msg.push(')');
            }
        }
    }
    msg
}

/// Adapter for anyhow::Result code: `.map_err(io_error_with_help("op", path))`.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(describe_io_error(op, path, &e))
}
