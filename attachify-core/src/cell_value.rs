//! Lossy stringification of raw table cells for template substitution.
//!
//! Hosts hand us untyped JSON per field. Templates only splice plain text,
//! so every cell type collapses to a string through a fixed set of
//! heuristics. Unknown shapes become the empty string rather than an error;
//! this is the documented extension point for new field types.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Field display name -> stringified cell value, rebuilt per record.
pub type FieldValueMap = HashMap<String, String>;

/// Tokens used for boolean cells. Localization of these is the host's
/// concern; the engine only needs a stable textual form.
pub const BOOL_TRUE_TOKEN: &str = "Yes";
pub const BOOL_FALSE_TOKEN: &str = "No";

/// Stringify a single raw cell value.
///
/// Never fails: anything unrecognized maps to `""`.
pub fn stringify_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => {
            if *b {
                BOOL_TRUE_TOKEN.to_string()
            } else {
                BOOL_FALSE_TOKEN.to_string()
            }
        },
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(stringify_element)
                .filter(|s| !s.is_empty())
                .collect();
            parts.join(",")
        },
        Value::Object(obj) => stringify_object(obj),
    }
}

/// Elements of list-valued cells (multi-select, collaborators, linked
/// records). Nested lists are not a shape any host produces; they collapse
/// to empty rather than recursing.
fn stringify_element(value: &Value) -> String {
    match value {
        Value::Array(_) => String::new(),
        other => stringify_cell(other),
    }
}

/// Object-valued cells: apply the first matching heuristic, in order.
fn stringify_object(obj: &Map<String, Value>) -> String {
    // Progress-like fields: { "status": "...", "value": 14 }
    if let Some(value) = obj.get("value") {
        match value {
            Value::Number(n) => return n.to_string(),
            Value::String(s) => return s.clone(),
            _ => {},
        }
    }
    // People, groups, linked records
    if let Some(Value::String(name)) = obj.get("name") {
        return name.clone();
    }
    // Rich text segments and options
    if let Some(Value::String(text)) = obj.get("text") {
        return text.clone();
    }
    if let Some(Value::String(title)) = obj.get("title") {
        return title.clone();
    }
    // Links: prefer the display text when present
    if let Some(Value::String(link)) = obj.get("link") {
        if let Some(Value::String(text)) = obj.get("text") {
            if !text.is_empty() {
                return text.clone();
            }
        }
        return link.clone();
    }
    // Geolocation fields
    if let Some(Value::String(location)) = obj.get("location") {
        return location.clone();
    }
    if let Some(Value::String(address)) = obj.get("address") {
        return address.clone();
    }
    String::new()
}

/// Build the per-record variable map from raw cells and the host-supplied
/// field-id -> display-name mapping. The mapping is a point-in-time
/// snapshot; fields absent from the record stringify to empty.
pub fn build_field_values(
    raw_fields: &Map<String, Value>,
    id_to_name: &HashMap<String, String>,
) -> FieldValueMap {
    let mut values = FieldValueMap::with_capacity(id_to_name.len());
    for (field_id, field_name) in id_to_name {
        let text = raw_fields
            .get(field_id)
            .map(stringify_cell)
            .unwrap_or_default();
        values.insert(field_name.clone(), text);
    }
    values
}
