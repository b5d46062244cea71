use crate::batch::RecordStore;
use crate::engine::RenameConfig;
use crate::output::PlanResult;
use crate::preview::build_plan;
use std::collections::HashMap;

/// Dry-run the naming rule over the first `limit` records of the scope and
/// return the resulting plan. Never mutates the store and never fails on
/// individual records.
pub fn plan_operation<S: RecordStore + ?Sized>(
    store: &S,
    field_id: &str,
    id_to_name: &HashMap<String, String>,
    config: &RenameConfig,
    record_ids: &[String],
    limit: usize,
) -> PlanResult {
    let plan = build_plan(store, field_id, id_to_name, config, record_ids, limit);

    PlanResult {
        field_id: field_id.to_string(),
        records_in_scope: record_ids.len(),
        records_previewed: plan.records_previewed,
        truncated: record_ids.len() > limit,
        items: plan.items,
    }
}
