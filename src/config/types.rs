//! Core configuration types.
//! - Config holds the settings of one run; built once, then only read.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::fs_ops::{gib_to_bytes, MoveOptions, SelectionCriteria};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Directory the files are taken from
    pub source: PathBuf,
    /// Directory the files are moved into; must already exist
    pub target: PathBuf,
    /// Budget in whole GiB
    pub amount_gib: u64,
    /// Regular expression searched in file names; empty selects everything
    pub filter: String,
    /// Move the oldest files first
    pub older_first: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, report what would move but do not modify the filesystem
    pub dry_run: bool,
    /// Copy modification times onto moved files
    pub preserve_times: bool,
    /// Skip the advisory lock on the source directory
    pub disable_locks: bool,
}

impl Config {
    /// Construct a Config with explicit directories; other fields use defaults.
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn criteria(&self) -> SelectionCriteria {
        SelectionCriteria::new(self.filter.clone(), self.older_first)
    }

    pub fn budget_bytes(&self) -> u64 {
        gib_to_bytes(self.amount_gib)
    }

    pub fn move_options(&self) -> MoveOptions {
        MoveOptions {
            dry_run: self.dry_run,
            preserve_times: self.preserve_times,
        }
    }
}
