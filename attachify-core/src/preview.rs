//! Dry-run plan construction for preview rendering.

use crate::batch::RecordStore;
use crate::cell_value::build_field_values;
use crate::engine::{rename_attachments, RenameConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Records inspected for a preview; scopes larger than this are truncated.
pub const PREVIEW_LIMIT: usize = 50;

/// One old-name/new-name pair from a dry run. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlanItem {
    pub record_id: String,
    pub attachment_index: usize,
    pub old_name: String,
    pub new_name: String,
}

/// Result of one dry run: the rename pairs plus how many records actually
/// contributed rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlan {
    pub items: Vec<RenamePlanItem>,
    /// Records that were fetched, decoded, and held at least one
    /// attachment. Failed and empty records inside the limit do not count.
    pub records_previewed: usize,
}

/// Compute plan items for up to `limit` records. Records that fail to
/// fetch, have no attachments, or hold a malformed cell are silently
/// skipped; a preview never fails on individual records.
pub fn build_plan<S: RecordStore + ?Sized>(
    store: &S,
    field_id: &str,
    id_to_name: &HashMap<String, String>,
    config: &RenameConfig,
    record_ids: &[String],
    limit: usize,
) -> RenamePlan {
    let mut plan = RenamePlan::default();

    for record_id in record_ids.iter().take(limit) {
        let Ok(record) = store.fetch(record_id) else {
            continue;
        };
        let Ok(attachments) = record.attachments(field_id) else {
            continue;
        };
        if attachments.is_empty() {
            continue;
        }

        plan.records_previewed += 1;
        let field_values = build_field_values(&record.fields, id_to_name);
        let outcome = rename_attachments(&attachments, config, &field_values);
        for (index, (old, new)) in attachments.iter().zip(&outcome.updated).enumerate() {
            plan.items.push(RenamePlanItem {
                record_id: record_id.clone(),
                attachment_index: index,
                old_name: old.name.clone(),
                new_name: new.name.clone(),
            });
        }
    }

    plan
}

/// Monotonic request counter that lets a newer preview supersede an older
/// one still in flight. There is no hard abort: the stale computation runs
/// to completion and its result is discarded.
#[derive(Debug, Default)]
pub struct PreviewGeneration(AtomicU64);

impl PreviewGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request and return its token, invalidating all earlier
    /// tokens.
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True while no newer request has begun since `token` was issued.
    pub fn is_current(&self, token: u64) -> bool {
        self.0.load(Ordering::SeqCst) == token
    }
}
