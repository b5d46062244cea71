//! Batched application of a naming rule across many records.
//!
//! Records are processed in fixed-size batches. Fetches inside a batch fan
//! out in parallel; writes are sequential, and batch N+1 never starts
//! before batch N's writes resolve. One bad record never aborts a run:
//! fetch failures are counted and skipped, and a failed combined write
//! falls back to writing each changed record individually.

use crate::attachment::{RecordSnapshot, RecordUpdate};
use crate::cell_value::build_field_values;
use crate::engine::{rename_attachments, RenameConfig};
use crate::error::StoreError;
use crate::undo::UndoSnapshot;
use crate::RecordData;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Records per batch, for both fetch fan-out and combined writes. The undo
/// path restores with the same granularity.
pub const BATCH_SIZE: usize = 50;

/// Abstract host table access. Implementations may suspend on I/O; the
/// processor only requires that fetches tolerate being issued in parallel.
pub trait RecordStore: Sync {
    /// Fetch one record's raw field values. May fail per record.
    fn fetch(&self, record_id: &str) -> Result<RecordData, StoreError>;

    /// Persist updated attachment lists for a batch of records. Fails or
    /// succeeds as a whole.
    fn write(&self, updates: &[RecordUpdate]) -> Result<(), StoreError>;
}

/// Final counters for one run. Records that were skipped (no attachments,
/// or the rule produced identical names) count neither as success nor as
/// failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

/// Progress reported after each batch completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// Result of a run: counters plus the pre-change snapshot covering every
/// record that was modified, if any.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: RunReport,
    pub snapshot: Option<UndoSnapshot>,
}

/// Drives the rename engine across a resolved record scope.
pub struct BatchProcessor<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    field_id: &'a str,
    id_to_name: &'a HashMap<String, String>,
    config: &'a RenameConfig,
}

impl<'a, S: RecordStore + ?Sized> BatchProcessor<'a, S> {
    pub fn new(
        store: &'a S,
        field_id: &'a str,
        id_to_name: &'a HashMap<String, String>,
        config: &'a RenameConfig,
    ) -> Self {
        Self {
            store,
            field_id,
            id_to_name,
            config,
        }
    }

    /// Process `record_ids` in order. Per-record failures are absorbed into
    /// the report; this function itself never fails. Scope resolution
    /// happens before this call, so a scope that cannot be enumerated never
    /// reaches the processor.
    pub fn run(
        &self,
        record_ids: &[String],
        mut on_progress: impl FnMut(Progress),
    ) -> RunOutcome {
        let total = record_ids.len();
        let mut report = RunReport {
            total,
            ..RunReport::default()
        };
        let mut undo_records: Vec<RecordSnapshot> = Vec::new();
        let mut processed = 0;

        for batch_ids in record_ids.chunks(BATCH_SIZE) {
            // Fan out the fetches, then rejoin; order is preserved.
            let fetched: Vec<Result<RecordData, StoreError>> = batch_ids
                .par_iter()
                .map(|id| self.store.fetch(id))
                .collect();

            let mut updates: Vec<RecordUpdate> = Vec::new();
            for (record_id, result) in batch_ids.iter().zip(fetched) {
                let record = match result {
                    Ok(record) => record,
                    Err(_) => {
                        report.failed += 1;
                        continue;
                    },
                };

                let attachments = match record.attachments(self.field_id) {
                    Ok(attachments) => attachments,
                    Err(_) => {
                        // A cell that cannot be decoded is a fetch-level
                        // failure for that record.
                        report.failed += 1;
                        continue;
                    },
                };
                if attachments.is_empty() {
                    continue;
                }

                let field_values = build_field_values(&record.fields, self.id_to_name);
                let outcome = rename_attachments(&attachments, self.config, &field_values);
                if !outcome.changed {
                    continue;
                }

                undo_records.push(RecordSnapshot {
                    record_id: record_id.clone(),
                    attachments,
                });
                updates.push(RecordUpdate {
                    record_id: record_id.clone(),
                    field_id: self.field_id.to_string(),
                    attachments: outcome.updated,
                });
            }

            self.write_batch(&updates, &mut report);

            processed += batch_ids.len();
            on_progress(Progress {
                current: processed,
                total,
            });
        }

        let snapshot = if undo_records.is_empty() {
            None
        } else {
            Some(UndoSnapshot::new(self.field_id, undo_records))
        };

        RunOutcome { report, snapshot }
    }

    /// One combined write for the whole batch; on failure, retry each
    /// record individually so a single bad record cannot block the rest.
    /// Individual failures are terminal for that record.
    fn write_batch(&self, updates: &[RecordUpdate], report: &mut RunReport) {
        if updates.is_empty() {
            return;
        }

        match self.store.write(updates) {
            Ok(()) => report.success += updates.len(),
            Err(_) => {
                for update in updates {
                    match self.store.write(std::slice::from_ref(update)) {
                        Ok(()) => report.success += 1,
                        Err(_) => report.failed += 1,
                    }
                }
            },
        }
    }
}
