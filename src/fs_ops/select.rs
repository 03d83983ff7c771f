//! Selector: turn a source directory listing into a TransferPlan.
//! Directories are dropped, names are matched against the filter, and the
//! survivors are optionally sorted oldest first.

use regex::Regex;
use std::path::Path;
use tracing::debug;

use crate::errors::ListError;

use super::entry::{FileEntry, SelectionCriteria, TransferPlan};
use super::store::FileStore;

/// Compile the user-supplied filter. The match is unanchored, so an empty
/// pattern accepts every name.
pub fn compile_filter(pattern: &str) -> Result<Regex, ListError> {
    Regex::new(pattern).map_err(|source| ListError::InvalidFilter {
        pattern: pattern.to_string(),
        source,
    })
}

/// Build the plan for `source_dir`. Read-only.
pub fn select<S: FileStore + ?Sized>(
    store: &S,
    source_dir: &Path,
    criteria: &SelectionCriteria,
) -> Result<TransferPlan, ListError> {
    let filter = compile_filter(&criteria.filter_pattern)?;
    let listing = store.list(source_dir)?;
    let listed = listing.len();

    let mut retained: Vec<FileEntry> = listing
        .into_iter()
        .filter(|e| !e.is_dir)
        .filter(|e| filter.is_match(&e.name))
        .collect();

    if criteria.older_first {
        // stable: equal timestamps keep listing order
        retained.sort_by_key(|e| e.modified);
    }

    debug!(
        source = %source_dir.display(),
        listed,
        selected = retained.len(),
        filter = %criteria.filter_pattern,
        older_first = criteria.older_first,
        "selected candidates"
    );
    Ok(TransferPlan::new(retained))
}
