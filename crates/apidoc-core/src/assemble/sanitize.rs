//! Broken-link removal

use regex::Regex;

use crate::registry::EntityId;

/// Rewrite every `[text][id]` link to plain `text`
///
/// Only links whose reference is exactly `id` are touched. Link text may not
/// contain brackets, so adjacent links on one line are rewritten one by one.
pub fn remove_broken_links(lines: &[String], id: &EntityId) -> Vec<String> {
    let pattern = format!(r"\[([^\[\]]+)\]\[{}\]", regex::escape(id.as_str()));
    // The ID is escaped, so the pattern is always valid
    let Ok(link) = Regex::new(&pattern) else {
        return lines.to_vec();
    };

    lines
        .iter()
        .map(|line| link.replace_all(line, "$1").into_owned())
        .collect()
}
