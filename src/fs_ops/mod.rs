//! Filesystem operations: selection, budgeted moves and their plumbing.

pub mod entry;
pub mod helpers;
mod lock;
#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;
pub mod mover;
pub mod select;
pub mod store;
pub mod transfer;

pub use entry::{FileEntry, SelectionCriteria, TransferPlan};
pub use helpers::{describe_io_error, io_error_with_help};
pub use lock::{try_lock_dir, DirLock};
#[cfg(any(test, feature = "test-helpers"))]
pub use memory::MemoryStore;
pub use mover::{gib_to_bytes, run, MoveOptions, Outcome, RunBudget, RunReport, BYTES_PER_GIB};
pub use select::{compile_filter, select};
pub use store::{FileStore, LocalStore};
pub use transfer::move_one;

use tracing::info;

use crate::config::Config;
use crate::errors::ListError;

/// List, filter and order the source, then move within the configured budget.
/// A ListError means nothing was touched.
pub fn plan_and_move<S: FileStore + ?Sized>(
    store: &S,
    config: &Config,
) -> Result<RunReport, ListError> {
    let plan = select(store, &config.source, &config.criteria())?;
    info!(
        source = %config.source.display(),
        target = %config.target.display(),
        candidates = plan.len(),
        candidate_bytes = plan.total_bytes(),
        budget_bytes = config.budget_bytes(),
        "Plan ready"
    );
    Ok(run(
        store,
        plan,
        &config.source,
        &config.target,
        config.budget_bytes(),
        config.move_options(),
    ))
}
