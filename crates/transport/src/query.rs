//! Query-string encoding for JSON query parameters.

use serde_json::{Map, Value};

/// Flattens query parameters into `(key, value)` pairs.
///
/// Strings are sent as-is, numbers and booleans as their JSON text, arrays as
/// one pair per element, objects as compact JSON. `null` values are omitted.
pub fn encode_query(query: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(query.len());
    for (key, value) in query {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = as_text(item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            value => {
                if let Some(text) = as_text(value) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    pairs
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
