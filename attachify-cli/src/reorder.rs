use crate::cli::OutputFormatArg;
use crate::store::JsonTableStore;
use anyhow::Result;
use attachify_core::{reorder_operation, OutputFormatter, UndoStack};
use std::path::Path;

pub fn handle_reorder(
    table_path: &Path,
    field: &str,
    record: &str,
    from: usize,
    to: usize,
    output: OutputFormatArg,
    use_color: bool,
) -> Result<String> {
    let store = JsonTableStore::load(table_path)?;
    let field = store.resolve_attachment_field(field)?;

    let mut undo_stack = UndoStack::new();
    let result = reorder_operation(&store, &field.id, record, from, to, &mut undo_stack)?;
    Ok(result.format(output.into(), use_color))
}
