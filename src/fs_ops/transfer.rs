//! Transfer primitive: read the whole source, write it to the target, then
//! delete the source. No rename is attempted, so both copies can briefly
//! coexist.

use std::io;
use std::path::Path;
use tracing::{info, warn};

use crate::errors::{TransferError, TransferPhase};

use super::entry::FileEntry;
use super::store::FileStore;

/// Move `entry` from `source_dir` to `target_dir`, overwriting any file of the
/// same name in the target.
///
/// - A read failure leaves both directories untouched.
/// - A write failure removes whatever part of the target got written; the
///   source stays in place.
/// - The source is removed only after the write succeeded.
pub fn move_one<S: FileStore + ?Sized>(
    store: &S,
    source_dir: &Path,
    entry: &FileEntry,
    target_dir: &Path,
    preserve_times: bool,
) -> Result<(), TransferError> {
    let src = source_dir.join(&entry.name);
    let dst = target_dir.join(&entry.name);
    info!(src = %src.display(), dest = %dst.display(), "Moving file");

    let contents = store
        .read(&src)
        .map_err(|e| TransferError::new(TransferPhase::Read, &src, e))?;

    if let Err(e) = store.write(&dst, &contents) {
        match store.remove(&dst) {
            Ok(()) => {}
            Err(cleanup) if cleanup.kind() == io::ErrorKind::NotFound => {}
            Err(cleanup) => {
                warn!(path = %dst.display(), error = %cleanup, "Could not remove partially written target");
            }
        }
        return Err(TransferError::new(TransferPhase::Write, &dst, e));
    }

    if preserve_times && let Err(e) = store.set_modified(&dst, entry.modified) {
        warn!(path = %dst.display(), error = %e, "Could not copy modification time to target");
    }

    store
        .remove(&src)
        .map_err(|e| TransferError::new(TransferPhase::Delete, &src, e))
}
