//! Core library for `move_upto`.
//!
//! Picks files out of a source directory (regex filter, optional oldest-first
//! order) and moves them to a target directory until a size budget is spent.
//! Selection and moving are separate steps joined by a `TransferPlan`, and both
//! run against the `FileStore` trait so they can be exercised without a disk.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;

pub use config::{
    default_config_path, load_config, load_config_from_xml_path, path_has_symlink_ancestor,
    Config, LogLevel,
};
pub use errors::{ListError, ListErrorKind, TransferError, TransferPhase};
pub use fs_ops::{
    move_one, plan_and_move, run, select, FileEntry, FileStore, LocalStore, MoveOptions,
    Outcome, RunReport, SelectionCriteria, TransferPlan,
};
#[cfg(any(test, feature = "test-helpers"))]
pub use fs_ops::MemoryStore;
