//! Typed error definitions for move_upto.
//! Listing errors abort a run before anything moves; transfer errors carry the
//! phase that failed so the mover can decide whether to stop.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fs_ops::helpers::describe_io_error;

/// Coarse classification of a [`ListError`], handy for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListErrorKind {
    NotFound,
    NotADirectory,
    InvalidFilter,
    IoFailure,
}

impl fmt::Display for ListErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ListErrorKind::NotFound => "not_found",
            ListErrorKind::NotADirectory => "not_a_directory",
            ListErrorKind::InvalidFilter => "invalid_filter",
            ListErrorKind::IoFailure => "io_failure",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum ListError {
    #[error("Source directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("The path {} is not a folder", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid filter pattern '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Error while {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListError {
    pub fn kind(&self) -> ListErrorKind {
        match self {
            ListError::NotFound(_) => ListErrorKind::NotFound,
            ListError::NotADirectory(_) => ListErrorKind::NotADirectory,
            ListError::InvalidFilter { .. } => ListErrorKind::InvalidFilter,
            ListError::Io { .. } => ListErrorKind::IoFailure,
        }
    }

    /// Wrap an io::Error raised while inspecting `path`.
    /// A missing path becomes `NotFound` so callers can match on it directly.
    pub fn from_io(op: &'static str, path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            ListError::NotFound(path.to_path_buf())
        } else {
            ListError::Io {
                op,
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Step of the read/write/delete sequence that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPhase {
    Read,
    Write,
    Delete,
}

impl TransferPhase {
    fn op(self) -> &'static str {
        match self {
            TransferPhase::Read => "read source file",
            TransferPhase::Write => "write target file",
            TransferPhase::Delete => "remove source file",
        }
    }
}

impl fmt::Display for TransferPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransferPhase::Read => "read",
            TransferPhase::Write => "write",
            TransferPhase::Delete => "delete",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
#[error("{phase} phase failed on {}: {source}", path.display())]
pub struct TransferError {
    pub phase: TransferPhase,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl TransferError {
    pub fn new(phase: TransferPhase, path: &Path, source: io::Error) -> Self {
        Self {
            phase,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Human-oriented message with a platform hint for the underlying OS error.
    pub fn describe(&self) -> String {
        describe_io_error(self.phase.op(), &self.path, &self.source)
    }
}
