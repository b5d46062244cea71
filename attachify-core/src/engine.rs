//! The rename engine: turns one record's attachment list into a renamed
//! list according to the active naming rule.
//!
//! `rename_attachments` is pure and deterministic. It touches no storage,
//! never fails, and reapplying the same rule to its own output is safe:
//! a rule that produces the names already present reports `changed: false`.

use crate::cell_value::FieldValueMap;
use crate::collision::ensure_unique;
use crate::sequence::sequence_for;
use crate::template::render;
use crate::Attachment;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How new names are derived from the template inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameMode {
    /// The rendered template replaces the base name entirely.
    #[default]
    Replace,
    /// Rendered text is spliced into the existing base name.
    Append,
}

/// Where append-mode text lands relative to the base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppendPosition {
    Prepend,
    #[default]
    Append,
    Insert,
}

/// The active naming rule. Immutable during a run.
///
/// Numeric fields may arrive negative from untrusted input; they are
/// clamped to non-negative values at the point of use, so the engine has
/// no invalid configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameConfig {
    #[serde(default)]
    pub mode: RenameMode,
    /// Replace mode: the full base-name template.
    #[serde(default)]
    pub template: String,
    /// Append mode: placement of the inserted text.
    #[serde(default)]
    pub position: AppendPosition,
    /// Append mode with `position: insert`: character offset into the base
    /// name (extension excluded) where the text is spliced in.
    #[serde(default)]
    pub insert_index: i64,
    /// Append mode: template rendered before the sequence token.
    #[serde(default)]
    pub front_template: String,
    /// Append mode: template rendered after the sequence token.
    #[serde(default)]
    pub back_template: String,
    #[serde(default = "default_sequence_start")]
    pub sequence_start: i64,
    #[serde(default)]
    pub sequence_pad: i64,
}

fn default_sequence_start() -> i64 {
    1
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            mode: RenameMode::Replace,
            template: String::new(),
            position: AppendPosition::Append,
            insert_index: 0,
            front_template: String::new(),
            back_template: String::new(),
            sequence_start: default_sequence_start(),
            sequence_pad: 0,
        }
    }
}

impl RenameConfig {
    fn sequence_start(&self) -> u64 {
        self.sequence_start.max(0) as u64
    }

    fn sequence_pad(&self) -> usize {
        self.sequence_pad.max(0) as usize
    }

    fn insert_index(&self, base_chars: usize) -> usize {
        let clamped = self.insert_index.max(0) as usize;
        clamped.min(base_chars)
    }
}

/// Result of running the engine over one attachment list.
#[derive(Debug, Clone, PartialEq)]
pub struct RenameOutcome {
    pub updated: Vec<Attachment>,
    /// True iff at least one output name differs from the input name at the
    /// same position.
    pub changed: bool,
}

/// Split a file name into `(base, extension)` at the last dot. The dot is
/// kept on the extension. A leading-dot name (`.gitignore`) has no
/// extension, matching hidden-file conventions, and neither does a name
/// without any dot.
pub fn split_file_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(0) | None => (name, ""),
        Some(idx) => name.split_at(idx),
    }
}

/// Apply the naming rule to an ordered attachment list.
pub fn rename_attachments(
    attachments: &[Attachment],
    config: &RenameConfig,
    field_values: &FieldValueMap,
) -> RenameOutcome {
    let mut used = HashSet::new();
    let mut updated = Vec::with_capacity(attachments.len());

    for (index, att) in attachments.iter().enumerate() {
        let (base, ext) = split_file_name(&att.name);
        let seq = sequence_for(config.sequence_start(), index, config.sequence_pad());

        let new_base = match config.mode {
            RenameMode::Replace => {
                let rendered = render(&config.template, &seq, field_values);
                // A rule that renders to nothing must never wipe the name.
                if rendered.trim().is_empty() {
                    base.to_string()
                } else {
                    rendered
                }
            },
            RenameMode::Append => {
                let front = render(&config.front_template, &seq, field_values);
                let back = render(&config.back_template, &seq, field_values);
                let insert_text = format!("{front}{seq}{back}");
                match config.position {
                    AppendPosition::Prepend => format!("{insert_text}{base}"),
                    AppendPosition::Append => format!("{base}{insert_text}"),
                    AppendPosition::Insert => {
                        let chars: Vec<char> = base.chars().collect();
                        let at = config.insert_index(chars.len());
                        let head: String = chars[..at].iter().collect();
                        let tail: String = chars[at..].iter().collect();
                        format!("{head}{insert_text}{tail}")
                    },
                }
            },
        };

        let final_name = ensure_unique(&new_base, ext, &mut used);
        updated.push(att.with_name(final_name));
    }

    let changed = updated
        .iter()
        .zip(attachments)
        .any(|(new, old)| new.name != old.name);

    RenameOutcome { updated, changed }
}

/// Move one attachment from `from` to `to`, preserving the relative order
/// of everything else. Out-of-range indices leave the list untouched.
pub fn reorder(attachments: &[Attachment], from: usize, to: usize) -> Vec<Attachment> {
    let mut next: Vec<Attachment> = attachments.to_vec();
    if from >= next.len() || to >= next.len() {
        return next;
    }
    let item = next.remove(from);
    next.insert(to, item);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn atts(names: &[&str]) -> Vec<Attachment> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Attachment::new(*n, format!("tok{i}")))
            .collect()
    }

    fn names(outcome: &RenameOutcome) -> Vec<&str> {
        outcome.updated.iter().map(|a| a.name.as_str()).collect()
    }

    fn replace(template: &str) -> RenameConfig {
        RenameConfig {
            template: template.to_string(),
            ..RenameConfig::default()
        }
    }

    #[test]
    fn split_keeps_last_dot_on_extension() {
        assert_eq!(split_file_name("photo.jpg"), ("photo", ".jpg"));
        assert_eq!(split_file_name("archive.tar.gz"), ("archive.tar", ".gz"));
    }

    #[test]
    fn split_edge_cases() {
        assert_eq!(split_file_name(".gitignore"), (".gitignore", ""));
        assert_eq!(split_file_name("README"), ("README", ""));
        assert_eq!(split_file_name("trailing."), ("trailing", "."));
    }

    #[test]
    fn replace_mode_renders_template_per_attachment() {
        let config = RenameConfig {
            sequence_pad: 2,
            ..replace("img_{{seq}}")
        };
        let outcome = rename_attachments(&atts(&["a.png", "b.jpg"]), &config, &HashMap::new());
        assert_eq!(names(&outcome), ["img_01.png", "img_02.jpg"]);
        assert!(outcome.changed);
    }

    #[test]
    fn replace_mode_blank_render_keeps_original_base() {
        let outcome = rename_attachments(&atts(&["keep.png"]), &replace("   "), &HashMap::new());
        assert_eq!(names(&outcome), ["keep.png"]);
        assert!(!outcome.changed);
    }

    #[test]
    fn replace_mode_keeps_untrimmed_render() {
        let outcome = rename_attachments(&atts(&["a.png"]), &replace(" x "), &HashMap::new());
        assert_eq!(names(&outcome), [" x .png"]);
    }

    #[test]
    fn append_mode_positions() {
        let base = RenameConfig {
            mode: RenameMode::Append,
            front_template: "-".to_string(),
            ..RenameConfig::default()
        };

        let prepend = RenameConfig {
            position: AppendPosition::Prepend,
            ..base.clone()
        };
        let outcome = rename_attachments(&atts(&["doc.pdf"]), &prepend, &HashMap::new());
        assert_eq!(names(&outcome), ["-1doc.pdf"]);

        let append = RenameConfig {
            position: AppendPosition::Append,
            ..base.clone()
        };
        let outcome = rename_attachments(&atts(&["doc.pdf"]), &append, &HashMap::new());
        assert_eq!(names(&outcome), ["doc-1.pdf"]);

        let insert = RenameConfig {
            position: AppendPosition::Insert,
            insert_index: 1,
            ..base
        };
        let outcome = rename_attachments(&atts(&["doc.pdf"]), &insert, &HashMap::new());
        assert_eq!(names(&outcome), ["d-1oc.pdf"]);
    }

    #[test]
    fn insert_index_clamps_to_base_length_and_zero() {
        let config = RenameConfig {
            mode: RenameMode::Append,
            position: AppendPosition::Insert,
            insert_index: 99,
            ..RenameConfig::default()
        };
        let outcome = rename_attachments(&atts(&["ab.txt"]), &config, &HashMap::new());
        assert_eq!(names(&outcome), ["ab1.txt"]);

        let config = RenameConfig {
            insert_index: -7,
            ..config
        };
        let outcome = rename_attachments(&atts(&["ab.txt"]), &config, &HashMap::new());
        assert_eq!(names(&outcome), ["1ab.txt"]);
    }

    #[test]
    fn insert_index_counts_characters_not_bytes() {
        let config = RenameConfig {
            mode: RenameMode::Append,
            position: AppendPosition::Insert,
            insert_index: 1,
            ..RenameConfig::default()
        };
        let outcome = rename_attachments(&atts(&["日本.txt"]), &config, &HashMap::new());
        assert_eq!(names(&outcome), ["日1本.txt"]);
    }

    #[test]
    fn colliding_bases_get_suffixes_in_list_order() {
        let outcome = rename_attachments(&atts(&["a.png", "a.png"]), &replace("a"), &HashMap::new());
        assert_eq!(names(&outcome), ["a.png", "a_1.png"]);
    }

    #[test]
    fn field_variables_flow_into_names() {
        let mut values = HashMap::new();
        values.insert("Title".to_string(), "Report".to_string());
        let outcome = rename_attachments(
            &atts(&["x.docx"]),
            &replace("{{Title}}_{{seq}}"),
            &values,
        );
        assert_eq!(names(&outcome), ["Report_1.docx"]);
    }

    #[test]
    fn metadata_and_order_pass_through() {
        let mut input = atts(&["b.png", "a.png"]);
        input[0]
            .extra
            .insert("size".into(), serde_json::json!(123));
        let outcome = rename_attachments(&input, &replace("n{{seq}}"), &HashMap::new());
        assert_eq!(outcome.updated[0].token, "tok0");
        assert_eq!(outcome.updated[1].token, "tok1");
        assert_eq!(outcome.updated[0].extra, input[0].extra);
    }

    #[test]
    fn unchanged_names_report_no_change() {
        let outcome = rename_attachments(&atts(&["a.png"]), &replace("a"), &HashMap::new());
        assert_eq!(names(&outcome), ["a.png"]);
        assert!(!outcome.changed);
    }

    #[test]
    fn negative_sequence_start_clamps_to_zero() {
        let config = RenameConfig {
            sequence_start: -5,
            ..replace("f{{seq}}")
        };
        let outcome = rename_attachments(&atts(&["x.txt", "y.txt"]), &config, &HashMap::new());
        assert_eq!(names(&outcome), ["f0.txt", "f1.txt"]);
    }

    #[test]
    fn reorder_moves_and_preserves_the_rest() {
        let list = atts(&["a", "b", "c", "d"]);
        let moved = reorder(&list, 2, 0);
        let got: Vec<&str> = moved.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(got, ["c", "a", "b", "d"]);
    }

    #[test]
    fn reorder_out_of_range_is_identity() {
        let list = atts(&["a", "b"]);
        assert_eq!(reorder(&list, 5, 0), list);
        assert_eq!(reorder(&list, 0, 5), list);
    }
}
