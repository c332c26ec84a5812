use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `{{field_id}}` tokens; ids are alphanumeric/underscore only. There is
    /// no escaping mechanism, anything else passes through untouched.
    pub static ref PLACEHOLDER_RE: Regex = Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").unwrap();
}

/// Extract the distinct placeholder ids referenced by a content string, in
/// first-occurrence order. Used to keep an entity's `data_fields` in sync
/// whenever content changes.
pub fn placeholders(content: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for capture in PLACEHOLDER_RE.captures_iter(content) {
        let id = capture[1].to_string();
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}
