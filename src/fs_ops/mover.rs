//! Budgeted mover: walk a TransferPlan in order, moving files until the byte
//! budget would be exceeded or a transfer fails.
//!
//! Policy is greedy-in-order: the first entry that does not fit ends the run,
//! even if a later, smaller entry would have fit.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::errors::{TransferError, TransferPhase};

use super::entry::TransferPlan;
use super::store::FileStore;
use super::transfer::move_one;

/// 1 GiB.
pub const BYTES_PER_GIB: u64 = 1024 * 1024 * 1024;

/// Convert a whole-gigabyte amount to bytes (1024-based, saturating).
pub fn gib_to_bytes(amount: u64) -> u64 {
    amount.saturating_mul(BYTES_PER_GIB)
}

/// Byte allowance for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBudget {
    maximum_bytes: u64,
    consumed_bytes: u64,
}

impl RunBudget {
    pub fn new(maximum_bytes: u64) -> Self {
        Self {
            maximum_bytes,
            consumed_bytes: 0,
        }
    }

    pub fn maximum_bytes(&self) -> u64 {
        self.maximum_bytes
    }

    pub fn consumed_bytes(&self) -> u64 {
        self.consumed_bytes
    }

    /// Charge `size` bytes if they fit. Returns false (and charges nothing)
    /// when the total would go above the maximum.
    pub fn try_consume(&mut self, size: u64) -> bool {
        let projected = self.consumed_bytes.saturating_add(size);
        if projected > self.maximum_bytes {
            return false;
        }
        self.consumed_bytes = projected;
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOptions {
    /// Walk the plan and the budget, but leave the store alone.
    pub dry_run: bool,
    /// Copy the source modification time onto the written target.
    pub preserve_times: bool,
}

#[derive(Debug)]
pub enum Outcome {
    /// Every entry of the plan was moved.
    Completed,
    /// The named entry would have pushed the total over the budget.
    StoppedOnBudget(String),
    /// Reading or writing the named entry failed.
    Failed { name: String, cause: TransferError },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub outcome: Outcome,
    /// Names moved (or, in a dry run, that would be moved), in plan order.
    pub moved: Vec<String>,
    pub consumed_bytes: u64,
    /// Entries copied to the target whose source could not be deleted.
    pub leftovers: Vec<String>,
}

/// Execute `plan` against `store` within `maximum_bytes`.
pub fn run<S: FileStore + ?Sized>(
    store: &S,
    plan: TransferPlan,
    source_dir: &Path,
    target_dir: &Path,
    maximum_bytes: u64,
    options: MoveOptions,
) -> RunReport {
    let mut budget = RunBudget::new(maximum_bytes);
    let mut moved = Vec::new();
    let mut leftovers = Vec::new();

    debug!(
        candidates = plan.len(),
        maximum_bytes,
        dry_run = options.dry_run,
        "starting budgeted move"
    );

    for entry in plan {
        if !budget.try_consume(entry.size) {
            info!(
                file = %entry.name,
                size = entry.size,
                consumed = budget.consumed_bytes(),
                maximum = budget.maximum_bytes(),
                "File is too big to be moved within the specified space; stopping"
            );
            return RunReport {
                outcome: Outcome::StoppedOnBudget(entry.name),
                moved,
                consumed_bytes: budget.consumed_bytes(),
                leftovers,
            };
        }

        if options.dry_run {
            info!(file = %entry.name, size = entry.size, "dry-run: would move file");
            moved.push(entry.name);
            continue;
        }

        match move_one(store, source_dir, &entry, target_dir, options.preserve_times) {
            Ok(()) => moved.push(entry.name),
            Err(e) if e.phase == TransferPhase::Delete => {
                warn!(file = %entry.name, error = %e, "Moved file but the source copy could not be removed");
                moved.push(entry.name.clone());
                leftovers.push(entry.name);
            }
            Err(cause) => {
                return RunReport {
                    outcome: Outcome::Failed {
                        name: entry.name,
                        cause,
                    },
                    moved,
                    consumed_bytes: budget.consumed_bytes(),
                    leftovers,
                };
            }
        }
    }

    RunReport {
        outcome: Outcome::Completed,
        moved,
        consumed_bytes: budget.consumed_bytes(),
        leftovers,
    }
}
