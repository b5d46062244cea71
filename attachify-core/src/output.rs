use crate::batch::RunReport;
use crate::diff::diff;
use crate::preview::RenamePlanItem;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a plan (dry-run preview) operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub field_id: String,
    pub records_in_scope: usize,
    pub records_previewed: usize,
    pub truncated: bool,
    pub items: Vec<RenamePlanItem>,
}

/// Result of an apply operation
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyResult {
    pub field_id: String,
    pub report: RunReport,
    pub undo_depth: usize,
}

/// Result of an undo operation
#[derive(Debug, Serialize, Deserialize)]
pub struct UndoResult {
    pub field_id: String,
    pub report: RunReport,
    pub undo_depth: usize,
}

/// Result of a single-record reorder
#[derive(Debug, Serialize, Deserialize)]
pub struct ReorderResult {
    pub record_id: String,
    pub field_id: String,
    pub names: Vec<String>,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat, use_color: bool) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(use_color),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self, use_color: bool) -> String;
}

impl OutputFormatter for PlanResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "field_id": self.field_id,
            "summary": {
                "records_in_scope": self.records_in_scope,
                "records_previewed": self.records_previewed,
                "truncated": self.truncated,
                "renames": self.items.len(),
            },
            "items": self.items,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self, use_color: bool) -> String {
        use comfy_table::{presets::UTF8_FULL, Table};

        let mut output = String::new();
        writeln!(
            output,
            "Previewing {} of {} record(s)",
            self.records_previewed, self.records_in_scope
        )
        .unwrap();

        if self.items.is_empty() {
            output.push_str("No attachments in scope\n");
            return output;
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Record", "#", "Old name", "New name"]);
        for item in &self.items {
            table.add_row(vec![
                item.record_id.clone(),
                (item.attachment_index + 1).to_string(),
                item.old_name.clone(),
                diff(&item.old_name, &item.new_name).render(use_color),
            ]);
        }
        output.push_str(&table.to_string());
        output.push('\n');

        if self.truncated {
            writeln!(output, "(preview truncated; apply covers the full scope)").unwrap();
        }
        output
    }
}

impl OutputFormatter for ApplyResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "apply",
            "field_id": self.field_id,
            "summary": {
                "total": self.report.total,
                "success": self.report.success,
                "failed": self.report.failed,
            },
            "undo_depth": self.undo_depth,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self, _use_color: bool) -> String {
        let mut output = format!(
            "✓ Processed {} record(s): {} renamed, {} failed\n",
            self.report.total, self.report.success, self.report.failed
        );
        if self.undo_depth > 0 {
            writeln!(output, "Undo available ({} level(s))", self.undo_depth).unwrap();
        }
        output
    }
}

impl OutputFormatter for UndoResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.report.failed == 0,
            "operation": "undo",
            "field_id": self.field_id,
            "summary": {
                "total": self.report.total,
                "restored": self.report.success,
                "failed": self.report.failed,
            },
            "undo_depth": self.undo_depth,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self, _use_color: bool) -> String {
        if self.report.failed == 0 {
            format!("✓ Restored {} record(s)\n", self.report.success)
        } else {
            format!(
                "⚠ Restored {} record(s), {} failed; the snapshot has been consumed\n",
                self.report.success, self.report.failed
            )
        }
    }
}

impl OutputFormatter for ReorderResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "reorder",
            "record_id": self.record_id,
            "field_id": self.field_id,
            "names": self.names,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self, _use_color: bool) -> String {
        let mut output = format!("✓ Reordered attachments in record '{}'\n", self.record_id);
        for (i, name) in self.names.iter().enumerate() {
            writeln!(output, "  {}. {}", i + 1, name).unwrap();
        }
        output
    }
}
