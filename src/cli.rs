//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Every setting can also come from the XML config; flags win.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Move files from one directory to another until a size budget is used up.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Move files between directories up to a size budget"
)]
pub struct Args {
    /// Defines the source folder from which the files are retrieved.
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Defines the destination folder where the files will be moved. Must exist.
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub target: Option<PathBuf>,

    /// Move the older files first (by modification time).
    #[arg(long)]
    pub older_first: bool,

    /// Number of gigabytes (GiB) to move at most.
    #[arg(long, value_name = "GIB")]
    pub amount: Option<u64>,

    /// Regular expression the file name must contain. Empty matches every file.
    #[arg(long, value_name = "PATTERN")]
    pub filter: Option<String>,

    /// Show what would be moved, but do not modify files.
    #[arg(long)]
    pub dry_run: bool,

    /// Copy modification times onto the moved files.
    #[arg(long)]
    pub preserve_times: bool,

    /// Do not lock the source directory (for filesystems where flock fails).
    #[arg(long)]
    pub disable_locks: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Read settings from this XML file instead of the default location.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print where the config file is looked up, then exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(p) = &self.source {
            cfg.source = p.clone();
        }
        if let Some(p) = &self.target {
            cfg.target = p.clone();
        }
        if let Some(amount) = self.amount {
            cfg.amount_gib = amount;
        }
        if let Some(filter) = &self.filter {
            cfg.filter = filter.clone();
        }
        if let Some(p) = &self.log_file {
            cfg.log_file = Some(p.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.older_first {
            cfg.older_first = true;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.preserve_times {
            cfg.preserve_times = true;
        }
        if self.disable_locks {
            cfg.disable_locks = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
