//! Sparse-field removal
//!
//! Records are stored and emitted without empty leaves so that a field
//! nobody has evidence for never overwrites one somebody does.

use serde_json::Value;

/// Recursively drop nulls, empty strings, empty objects and empty arrays
pub fn remove_empty(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, remove_empty(value)))
                .filter(|(_, value)| !is_empty(value))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(remove_empty)
                .filter(|value| !is_empty(value))
                .collect(),
        ),
        other => other,
    }
}

/// Whether a value counts as absent
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
