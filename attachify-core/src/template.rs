//! Naming template rendering.
//!
//! A template is literal text mixed with `{{name}}` placeholders. The
//! reserved name `seq` resolves to the per-attachment sequence token; any
//! other name is looked up in the record's field values. Rendering is
//! total: unknown variables become the empty string, never an error.

use crate::cell_value::FieldValueMap;
use regex::Regex;
use std::sync::OnceLock;

/// Literal sequence placeholder, offered verbatim by UIs as an insertable
/// token. Handled before the generic variable scan so it works even if a
/// field happens to be named `seq`.
pub const SEQ_TOKEN: &str = "{{seq}}";

/// Reserved variable name recognized inside the generic `{{...}}` syntax.
pub const SEQ_VAR: &str = "seq";

fn variable_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("valid variable regex"))
}

/// Render `template`, substituting `seq_text` for the sequence token and
/// field values for `{{name}}` placeholders.
pub fn render(template: &str, seq_text: &str, field_values: &FieldValueMap) -> String {
    let expanded = template.replace(SEQ_TOKEN, seq_text);

    variable_re()
        .replace_all(&expanded, |caps: &regex::Captures<'_>| {
            let name = caps[1].trim();
            if name == SEQ_VAR {
                return seq_text.to_string();
            }
            field_values.get(name).cloned().unwrap_or_default()
        })
        .into_owned()
}
