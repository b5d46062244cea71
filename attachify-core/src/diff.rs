//! Minimal old-name/new-name diff for preview highlighting.

use nu_ansi_term::Color as AnsiColor;
use serde::{Deserialize, Serialize};

/// The new name split into unchanged prefix, changed middle and unchanged
/// suffix. Only used for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffParts {
    pub prefix: String,
    pub highlighted: String,
    pub suffix: String,
}

/// Compute the changed span of `new_name` relative to `old_name`.
///
/// Finds the longest common prefix, then the longest common suffix; the
/// suffix scan starts after the prefix boundary so the two regions never
/// overlap. Comparison is per character, not per byte.
pub fn diff(old_name: &str, new_name: &str) -> DiffParts {
    let old: Vec<char> = old_name.chars().collect();
    let new: Vec<char> = new_name.chars().collect();

    let max_start = old.len().min(new.len());
    let mut start = 0;
    while start < max_start && old[start] == new[start] {
        start += 1;
    }

    let mut end_old = old.len();
    let mut end_new = new.len();
    while end_old > start && end_new > start && old[end_old - 1] == new[end_new - 1] {
        end_old -= 1;
        end_new -= 1;
    }

    DiffParts {
        prefix: new[..start].iter().collect(),
        highlighted: new[start..end_new].iter().collect(),
        suffix: new[end_new..].iter().collect(),
    }
}

impl DiffParts {
    /// True when the two names were identical.
    pub fn is_empty(&self) -> bool {
        self.highlighted.is_empty()
    }

    /// Render the new name with the changed span highlighted for terminals.
    pub fn render(&self, use_color: bool) -> String {
        if !use_color || self.highlighted.is_empty() {
            return format!("{}{}{}", self.prefix, self.highlighted, self.suffix);
        }
        format!(
            "{}{}{}",
            self.prefix,
            AnsiColor::Green.bold().paint(&self.highlighted),
            self.suffix
        )
    }
}
