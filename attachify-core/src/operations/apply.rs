use crate::batch::{BatchProcessor, Progress, RecordStore};
use crate::engine::{RenameConfig, RenameMode};
use crate::output::ApplyResult;
use crate::undo::UndoStack;
use anyhow::{bail, Result};
use std::collections::HashMap;

/// Run the rename across the resolved scope and record the pre-change
/// snapshot on the undo stack.
///
/// Per-record failures end up in the report, never here; the only fatal
/// conditions are an unusable rule or a scope the caller failed to resolve
/// (which never reaches this function).
pub fn apply_operation<S: RecordStore + ?Sized>(
    store: &S,
    field_id: &str,
    id_to_name: &HashMap<String, String>,
    config: &RenameConfig,
    record_ids: &[String],
    undo_stack: &mut UndoStack,
    on_progress: impl FnMut(Progress),
) -> Result<ApplyResult> {
    if config.mode == RenameMode::Replace && config.template.trim().is_empty() {
        bail!("replace mode requires a non-empty name template");
    }

    let processor = BatchProcessor::new(store, field_id, id_to_name, config);
    let outcome = processor.run(record_ids, on_progress);

    if let Some(snapshot) = outcome.snapshot {
        undo_stack.push(snapshot);
    }

    Ok(ApplyResult {
        field_id: field_id.to_string(),
        report: outcome.report,
        undo_depth: undo_stack.len(),
    })
}
