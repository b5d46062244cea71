use crate::cli::{OutputFormatArg, RuleArgs, TargetArgs};
use crate::store::JsonTableStore;
use anyhow::Result;
use attachify_core::config::DefaultsConfig;
use attachify_core::{plan_operation, OutputFormatter};
use std::path::Path;

#[allow(clippy::too_many_arguments)]
pub fn handle_plan(
    table_path: &Path,
    target: &TargetArgs,
    rule: &RuleArgs,
    limit: Option<usize>,
    output: OutputFormatArg,
    use_color: bool,
    defaults: &DefaultsConfig,
) -> Result<String> {
    let store = JsonTableStore::load(table_path)?;
    let field = store.resolve_attachment_field(&target.field)?;
    let record_ids = if target.records.is_empty() {
        store.record_ids()
    } else {
        target.records.clone()
    };
    let id_to_name = store.variable_fields(&field.id);
    let config = rule.to_config(defaults);
    let limit = limit.unwrap_or(defaults.preview_limit);

    let result = plan_operation(&store, &field.id, &id_to_name, &config, &record_ids, limit);
    Ok(result.format(output.into(), use_color))
}
