//! JSON-file host table.
//!
//! A table document holds field metadata and records; the attachment cell
//! layout matches what the core expects from any host. Every successful
//! write persists the whole document back to disk, so a crashed run leaves
//! the file at the last completed batch.

use anyhow::{anyhow, Context, Result};
use attachify_core::{RecordData, RecordStore, RecordUpdate, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const ATTACHMENT_FIELD_TYPE: &str = "attachment";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMeta {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableRecord {
    id: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableDocument {
    #[serde(default)]
    fields: Vec<FieldMeta>,
    #[serde(default)]
    records: Vec<TableRecord>,
}

pub struct JsonTableStore {
    path: PathBuf,
    doc: Mutex<TableDocument>,
}

impl JsonTableStore {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read table file: {}", path.display()))?;
        let doc: TableDocument = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse table file: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            doc: Mutex::new(doc),
        })
    }

    /// All record ids in table order. This is the CLI's whole-table scope;
    /// narrower scopes come from --records.
    pub fn record_ids(&self) -> Vec<String> {
        let doc = self.doc.lock().unwrap();
        doc.records.iter().map(|r| r.id.clone()).collect()
    }

    /// Resolve an attachment field given its display name or id.
    pub fn resolve_attachment_field(&self, name_or_id: &str) -> Result<FieldMeta> {
        let doc = self.doc.lock().unwrap();
        let field = doc
            .fields
            .iter()
            .find(|f| f.id == name_or_id || f.name == name_or_id)
            .ok_or_else(|| anyhow!("no field named '{}' in the table", name_or_id))?;
        if field.field_type != ATTACHMENT_FIELD_TYPE {
            return Err(anyhow!(
                "field '{}' is not an attachment field (type: '{}')",
                field.name,
                field.field_type
            ));
        }
        Ok(field.clone())
    }

    /// Field-id -> display-name mapping for template variables. The target
    /// attachment field is excluded; its cells are what gets renamed, not a
    /// template input.
    pub fn variable_fields(&self, attachment_field_id: &str) -> HashMap<String, String> {
        let doc = self.doc.lock().unwrap();
        doc.fields
            .iter()
            .filter(|f| f.id != attachment_field_id)
            .map(|f| (f.id.clone(), f.name.clone()))
            .collect()
    }

    fn persist(&self, doc: &TableDocument) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(doc)
            .map_err(|e| StoreError::write(doc.records.len(), e))?;
        fs::write(&self.path, content).map_err(|e| StoreError::write(doc.records.len(), e))
    }
}

impl RecordStore for JsonTableStore {
    fn fetch(&self, record_id: &str) -> Result<RecordData, StoreError> {
        let doc = self.doc.lock().unwrap();
        doc.records
            .iter()
            .find(|r| r.id == record_id)
            .map(|r| RecordData {
                record_id: r.id.clone(),
                fields: r.fields.clone(),
            })
            .ok_or_else(|| StoreError::NotFound {
                id: record_id.to_string(),
            })
    }

    fn write(&self, updates: &[RecordUpdate]) -> Result<(), StoreError> {
        let mut doc = self.doc.lock().unwrap();
        // Stage the batch on a copy and commit only after persisting, so a
        // failed write leaves both memory and disk at the previous state.
        let mut staged = doc.clone();
        for update in updates {
            let record = staged
                .records
                .iter_mut()
                .find(|r| r.id == update.record_id)
                .ok_or_else(|| StoreError::NotFound {
                    id: update.record_id.clone(),
                })?;
            let cell = serde_json::to_value(&update.attachments)
                .map_err(|e| StoreError::write(updates.len(), e))?;
            record.fields.insert(update.field_id.clone(), cell);
        }
        self.persist(&staged)?;
        *doc = staged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attachify_core::Attachment;
    use std::io::Write as _;

    fn sample_table() -> &'static str {
        r#"{
            "fields": [
                {"id": "fld_title", "name": "Title", "type": "text"},
                {"id": "fld_files", "name": "Files", "type": "attachment"}
            ],
            "records": [
                {"id": "rec1", "fields": {
                    "fld_title": "Report",
                    "fld_files": [{"name": "a.png", "token": "t1"}]
                }}
            ]
        }"#
    }

    fn write_table(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn resolves_field_by_name_and_id() {
        let file = write_table(sample_table());
        let store = JsonTableStore::load(file.path()).unwrap();

        assert_eq!(
            store.resolve_attachment_field("Files").unwrap().id,
            "fld_files"
        );
        assert_eq!(
            store.resolve_attachment_field("fld_files").unwrap().name,
            "Files"
        );
        assert!(store.resolve_attachment_field("Title").is_err());
        assert!(store.resolve_attachment_field("Nope").is_err());
    }

    #[test]
    fn variable_fields_exclude_the_target() {
        let file = write_table(sample_table());
        let store = JsonTableStore::load(file.path()).unwrap();
        let vars = store.variable_fields("fld_files");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("fld_title").unwrap(), "Title");
    }

    #[test]
    fn write_persists_to_disk() {
        let file = write_table(sample_table());
        let store = JsonTableStore::load(file.path()).unwrap();

        store
            .write(&[RecordUpdate {
                record_id: "rec1".into(),
                field_id: "fld_files".into(),
                attachments: vec![Attachment::new("renamed.png", "t1")],
            }])
            .unwrap();

        let reloaded = JsonTableStore::load(file.path()).unwrap();
        let record = reloaded.fetch("rec1").unwrap();
        let attachments = record.attachments("fld_files").unwrap();
        assert_eq!(attachments[0].name, "renamed.png");
    }

    #[test]
    fn failed_write_leaves_memory_and_disk_untouched() {
        let file = write_table(sample_table());
        let store = JsonTableStore::load(file.path()).unwrap();

        // One valid update followed by one for a record that does not exist
        let result = store.write(&[
            RecordUpdate {
                record_id: "rec1".into(),
                field_id: "fld_files".into(),
                attachments: vec![Attachment::new("renamed.png", "t1")],
            },
            RecordUpdate {
                record_id: "missing".into(),
                field_id: "fld_files".into(),
                attachments: Vec::new(),
            },
        ]);
        assert!(matches!(result, Err(StoreError::NotFound { .. })));

        let names: Vec<String> = store
            .fetch("rec1")
            .unwrap()
            .attachments("fld_files")
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["a.png"]);

        let reloaded = JsonTableStore::load(file.path()).unwrap();
        let on_disk = reloaded.fetch("rec1").unwrap().attachments("fld_files").unwrap();
        assert_eq!(on_disk[0].name, "a.png");
    }

    #[test]
    fn unknown_record_is_not_found() {
        let file = write_table(sample_table());
        let store = JsonTableStore::load(file.path()).unwrap();
        assert!(matches!(
            store.fetch("missing"),
            Err(StoreError::NotFound { .. })
        ));
    }
}
