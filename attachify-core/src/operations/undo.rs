use crate::batch::RecordStore;
use crate::output::UndoResult;
use crate::undo::{restore_snapshot, UndoStack};
use anyhow::{bail, Result};

/// Restore the most recent snapshot.
///
/// The snapshot is popped before any write is issued and is never re-queued:
/// a partially failed restore surfaces its failure count but still consumes
/// one undo level. Unlike apply, there is no per-record retry.
pub fn undo_operation<S: RecordStore + ?Sized>(
    store: &S,
    undo_stack: &mut UndoStack,
) -> Result<UndoResult> {
    let Some(snapshot) = undo_stack.pop() else {
        bail!("nothing to undo");
    };

    let report = restore_snapshot(&snapshot, store);

    Ok(UndoResult {
        field_id: snapshot.field_id,
        report,
        undo_depth: undo_stack.len(),
    })
}
