use crate::cli::{OutputFormatArg, RuleArgs, TargetArgs};
use crate::store::JsonTableStore;
use anyhow::Result;
use attachify_core::config::DefaultsConfig;
use attachify_core::{apply_operation, undo_operation, OutputFormatter, UndoStack};
use std::io::BufRead;
use std::path::Path;

#[allow(clippy::too_many_arguments)]
pub fn handle_apply(
    table_path: &Path,
    target: &TargetArgs,
    rule: &RuleArgs,
    confirm: bool,
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

    // Undo history lives only for this invocation; it is never persisted.
    let mut undo_stack = UndoStack::new();

    let result = apply_operation(
        &store,
        &field.id,
        &id_to_name,
        &config,
        &record_ids,
        &mut undo_stack,
        |progress| {
            eprintln!("Processed {}/{} record(s)", progress.current, progress.total);
        },
    )?;

    let mut rendered = result.format(output.into(), use_color);

    if confirm && !undo_stack.is_empty() {
        eprint!("Keep these changes? [Y/n] ");
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        if answer.trim().eq_ignore_ascii_case("n") {
            let undone = undo_operation(&store, &mut undo_stack)?;
            rendered.push_str(&undone.format(output.into(), use_color));
        }
    }

    Ok(rendered)
}
