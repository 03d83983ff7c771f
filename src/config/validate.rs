//! Config validation logic.
//! Checks that both directories are given, that the target already exists as a
//! directory, and that source and target are not the same place.
//!
//! The source itself is not checked here: a missing or non-directory source is
//! reported by the selector as a listing error.

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error};

use crate::fs_ops::io_error_with_help;

use super::types::Config;

impl Config {
    /// Validate a fully merged Config before a run.
    pub fn validate(&self) -> Result<()> {
        ensure_set(&self.source, "source")?;
        ensure_set(&self.target, "target")?;
        ensure_existing_dir(&self.target, "target")?;

        // Resolve symlinks so "dir" and "./dir/../dir" compare equal.
        if let Ok(src_real) = dunce::canonicalize(&self.source) {
            let dst_real = dunce::canonicalize(&self.target).unwrap_or_else(|_| self.target.clone());
            if src_real == dst_real {
                bail!(
                    "source and target resolve to the same path: '{}'",
                    src_real.display()
                );
            }
        }

        if self.amount_gib == 0 {
            debug!("amount is 0; only empty files can be moved");
        }
        debug!(
            source = %self.source.display(),
            target = %self.target.display(),
            amount_gib = self.amount_gib,
            "Config validated"
        );
        Ok(())
    }
}

fn ensure_set(path: &Path, name: &str) -> Result<()> {
    if path.as_os_str().is_empty() {
        error!("{name} directory is not set");
        bail!("{name} directory is not set; pass --{name} or set <{name}> in the config file");
    }
    Ok(())
}

/// The target is never created; it must already be a directory.
fn ensure_existing_dir(path: &Path, name: &str) -> Result<()> {
    let meta = fs::metadata(path).map_err(io_error_with_help("inspect target directory", path))?;
    if !meta.is_dir() {
        error!("{name} is not a directory: {}", path.display());
        bail!("{name} is not a directory: {}", path.display());
    }
    Ok(())
}
