//! Bounded undo history and snapshot restoration.
//!
//! Snapshots live in memory for the duration of the coordinator that owns
//! the stack; they are never persisted across process restarts.

use crate::attachment::{RecordSnapshot, RecordUpdate};
use crate::batch::{RecordStore, RunReport, BATCH_SIZE};
use serde::{Deserialize, Serialize};

/// Maximum number of snapshots retained; pushing past this evicts the
/// oldest.
pub const UNDO_DEPTH: usize = 5;

/// Pre-change state of every record modified by one apply (or one reorder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoSnapshot {
    pub field_id: String,
    pub created_at: String,
    pub records: Vec<RecordSnapshot>,
}

impl UndoSnapshot {
    pub fn new(field_id: impl Into<String>, records: Vec<RecordSnapshot>) -> Self {
        Self {
            field_id: field_id.into(),
            created_at: chrono::Local::now().to_rfc3339(),
            records,
        }
    }
}

/// Most-recent-first stack of undo snapshots, capped at [`UNDO_DEPTH`].
#[derive(Debug, Default)]
pub struct UndoStack {
    snapshots: Vec<UndoSnapshot>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a snapshot, evicting the oldest beyond the depth cap.
    pub fn push(&mut self, snapshot: UndoSnapshot) {
        self.snapshots.insert(0, snapshot);
        self.snapshots.truncate(UNDO_DEPTH);
    }

    /// The snapshot the next undo would restore.
    pub fn peek(&self) -> Option<&UndoSnapshot> {
        self.snapshots.first()
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Option<UndoSnapshot> {
        if self.snapshots.is_empty() {
            None
        } else {
            Some(self.snapshots.remove(0))
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Write a snapshot's records back to the store, batched the same way as
/// forward application.
///
/// Every batch is issued even when an earlier one fails; failures are
/// counted, not retried. The caller pops the snapshot before calling this,
/// so a partially failed restore still consumes it (at-most-one-retry
/// semantics).
pub fn restore_snapshot<S: RecordStore + ?Sized>(snapshot: &UndoSnapshot, store: &S) -> RunReport {
    let mut report = RunReport {
        total: snapshot.records.len(),
        ..RunReport::default()
    };

    for batch in snapshot.records.chunks(BATCH_SIZE) {
        let updates: Vec<RecordUpdate> = batch
            .iter()
            .map(|rec| RecordUpdate {
                record_id: rec.record_id.clone(),
                field_id: snapshot.field_id.clone(),
                attachments: rec.attachments.clone(),
            })
            .collect();

        match store.write(&updates) {
            Ok(()) => report.success += updates.len(),
            Err(_) => report.failed += updates.len(),
        }
    }

    report
}
