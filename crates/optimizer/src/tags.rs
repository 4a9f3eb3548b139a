//! Tag blob parsing
//!
//! Billing exports carry tags either as a JSON object or as
//! `key=value;key=value` text, and frequently as garbage. Parsing is
//! total: malformed input degrades to an empty map rather than failing
//! the row.

use std::collections::HashMap;

use serde_json::Value;

/// Decode a raw tag blob into a key/value map.
///
/// A value starting with `{` is tried as a JSON object first; on decode
/// failure it falls through to delimiter parsing. Delimiter segments
/// without a `=` are silently dropped. Never fails.
pub fn parse_tags(raw: Option<&str>) -> HashMap<String, String> {
    let Some(raw) = raw else {
        return HashMap::new();
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return HashMap::new();
    }

    if trimmed.starts_with('{') {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
            return map
                .into_iter()
                .map(|(key, value)| match value {
                    Value::String(s) => (key, s),
                    other => (key, other.to_string()),
                })
                .collect();
        }
        // fall through to delimiter parsing on decode failure
    }

    let mut tags = HashMap::new();
    for segment in trimmed.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if let Some((key, value)) = segment.split_once('=') {
            tags.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    tags
}
