use crate::attachment::{RecordSnapshot, RecordUpdate};
use crate::batch::RecordStore;
use crate::engine::reorder;
use crate::output::ReorderResult;
use crate::undo::{UndoSnapshot, UndoStack};
use anyhow::{bail, Context, Result};

/// Move one attachment within a single record and persist the new order.
/// The pre-change list is pushed onto the undo stack, same as a batch
/// apply.
pub fn reorder_operation<S: RecordStore + ?Sized>(
    store: &S,
    field_id: &str,
    record_id: &str,
    from: usize,
    to: usize,
    undo_stack: &mut UndoStack,
) -> Result<ReorderResult> {
    let record = store
        .fetch(record_id)
        .with_context(|| format!("failed to fetch record '{record_id}'"))?;
    let attachments = record
        .attachments(field_id)
        .with_context(|| format!("record '{record_id}' has a malformed attachment cell"))?;

    if from >= attachments.len() || to >= attachments.len() {
        bail!(
            "index out of range: record '{}' has {} attachment(s)",
            record_id,
            attachments.len()
        );
    }

    let next = reorder(&attachments, from, to);
    if next == attachments {
        return Ok(ReorderResult {
            record_id: record_id.to_string(),
            field_id: field_id.to_string(),
            names: attachments.into_iter().map(|a| a.name).collect(),
        });
    }

    store
        .write(&[RecordUpdate {
            record_id: record_id.to_string(),
            field_id: field_id.to_string(),
            attachments: next.clone(),
        }])
        .context("failed to persist reordered attachments")?;

    undo_stack.push(UndoSnapshot::new(
        field_id,
        vec![RecordSnapshot {
            record_id: record_id.to_string(),
            attachments,
        }],
    ));

    Ok(ReorderResult {
        record_id: record_id.to_string(),
        field_id: field_id.to_string(),
        names: next.into_iter().map(|a| a.name).collect(),
    })
}
