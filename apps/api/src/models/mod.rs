pub mod assessment;
pub mod criteria;
pub mod resume;

use serde_json::{Map, Value};

/// Accepts an array, a single item, or nothing.
pub(crate) fn coerce_list(value: Option<Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(Value::String(s)) if s.trim().is_empty() => Vec::new(),
        Some(other) => vec![other],
    }
}

/// Accepts an object; anything else is kept under a `value` key.
pub(crate) fn coerce_object(value: Option<Value>) -> Map<String, Value> {
    match value {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(other) => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}
