//! Tag input normalization
//!
//! Clients send tags as a list, as a JSON-encoded list inside a string, or as a
//! comma-separated string. Every shape collapses to a list of trimmed, non-empty
//! strings; anything unrecognizable becomes no tags rather than an error.

use serde::Deserialize;
use serde_json::Value;

/// Tag payload as received at the boundary
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum RawTags {
    /// A single string: JSON-encoded array or comma-separated list
    Text(String),
    /// A structured list; non-string entries are already discarded
    List(Vec<String>),
    /// Missing, null, number, object, ...
    #[default]
    Other,
}

impl From<Value> for RawTags {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => RawTags::Text(text),
            Value::Array(items) => RawTags::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => RawTags::Other,
        }
    }
}

impl From<&str> for RawTags {
    fn from(text: &str) -> Self {
        RawTags::Text(text.to_string())
    }
}

impl From<Vec<String>> for RawTags {
    fn from(list: Vec<String>) -> Self {
        RawTags::List(list)
    }
}

/// Normalize any tag payload to trimmed, non-empty strings (order kept, no dedup)
pub fn normalize_tags(raw: &RawTags) -> Vec<String> {
    match raw {
        RawTags::List(items) => clean(items),
        RawTags::Text(text) => match serde_json::from_str::<Vec<String>>(text) {
            Ok(items) => clean(&items),
            Err(_) => clean(&text.split(',').collect::<Vec<_>>()),
        },
        RawTags::Other => Vec::new(),
    }
}

fn clean<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .map(|tag| tag.as_ref().trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
