use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One file attachment stored in a record's attachment cell.
///
/// Identity for ordering and uniqueness purposes is the `name`; `token` is
/// an opaque host identifier that passes through every operation unchanged.
/// Any other metadata the host attaches (size, mime type, urls) is captured
/// in `extra` and round-trips verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    #[serde(default)]
    pub token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
            extra: Map::new(),
        }
    }

    /// Copy of this attachment with only the name replaced.
    pub fn with_name(&self, name: String) -> Self {
        Self {
            name,
            token: self.token.clone(),
            extra: self.extra.clone(),
        }
    }
}

/// Raw record contents as fetched from the host store: every cell keyed by
/// field id, values untyped JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordData {
    pub record_id: String,
    pub fields: Map<String, Value>,
}

impl RecordData {
    /// Decode the attachment list stored under `field_id`.
    ///
    /// A missing or null cell is an empty list. Anything else that is not a
    /// list of attachments is reported as a malformed cell so the caller can
    /// count the record as failed rather than silently dropping it.
    pub fn attachments(&self, field_id: &str) -> Result<Vec<Attachment>, StoreError> {
        match self.fields.get(field_id) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|e| StoreError::MalformedCell {
                    id: self.record_id.clone(),
                    reason: e.to_string(),
                })
            },
        }
    }
}

/// A pending write: replace one record's attachment list for a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub record_id: String,
    pub field_id: String,
    pub attachments: Vec<Attachment>,
}

/// Pre-change attachment list of one record, captured for undo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    pub record_id: String,
    pub attachments: Vec<Attachment>,
}
