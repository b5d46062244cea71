use attachify_core::{Attachment, RecordData, RecordStore, RecordUpdate, StoreError};
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// In-memory host table with injectable failures, shared by the
/// integration suites.
#[derive(Default)]
pub struct MemStore {
    records: Mutex<HashMap<String, RecordData>>,
    pub fail_fetch: HashSet<String>,
    pub fail_write_records: HashSet<String>,
    /// Fail every write touching more than one record (forces the
    /// individual-retry path).
    pub fail_combined_writes: bool,
    pub write_calls: Mutex<Vec<usize>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_record(&self, record_id: &str, fields: Map<String, Value>) {
        self.records.lock().unwrap().insert(
            record_id.to_string(),
            RecordData {
                record_id: record_id.to_string(),
                fields,
            },
        );
    }

    pub fn insert_with_attachments(&self, record_id: &str, names: &[&str]) {
        let attachments: Vec<Value> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                serde_json::to_value(Attachment::new(*name, format!("{record_id}_tok{i}"))).unwrap()
            })
            .collect();
        let mut fields = Map::new();
        fields.insert("fld_att".into(), json!(attachments));
        self.insert_record(record_id, fields);
    }

    pub fn attachment_names(&self, record_id: &str, field_id: &str) -> Vec<String> {
        let records = self.records.lock().unwrap();
        let record = records.get(record_id).expect("record exists");
        record
            .attachments(field_id)
            .expect("valid attachment cell")
            .into_iter()
            .map(|a| a.name)
            .collect()
    }

    pub fn tokens(&self, record_id: &str, field_id: &str) -> Vec<String> {
        let records = self.records.lock().unwrap();
        let record = records.get(record_id).expect("record exists");
        record
            .attachments(field_id)
            .expect("valid attachment cell")
            .into_iter()
            .map(|a| a.token)
            .collect()
    }
}

impl RecordStore for MemStore {
    fn fetch(&self, record_id: &str) -> Result<RecordData, StoreError> {
        if self.fail_fetch.contains(record_id) {
            return Err(StoreError::fetch(record_id, "injected fetch failure"));
        }
        self.records
            .lock()
            .unwrap()
            .get(record_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                id: record_id.to_string(),
            })
    }

    fn write(&self, updates: &[RecordUpdate]) -> Result<(), StoreError> {
        self.write_calls.lock().unwrap().push(updates.len());
        if self.fail_combined_writes && updates.len() > 1 {
            return Err(StoreError::write(updates.len(), "injected batch failure"));
        }
        if updates
            .iter()
            .any(|u| self.fail_write_records.contains(&u.record_id))
        {
            return Err(StoreError::write(updates.len(), "injected write failure"));
        }
        let mut records = self.records.lock().unwrap();
        for update in updates {
            let record = records
                .get_mut(&update.record_id)
                .ok_or_else(|| StoreError::NotFound {
                    id: update.record_id.clone(),
                })?;
            record.fields.insert(
                update.field_id.clone(),
                serde_json::to_value(&update.attachments).unwrap(),
            );
        }
        Ok(())
    }
}
