//! Outbound payload shaping: body cleaning and query-string encoding.

use serde_json::{Map, Value};

/// Drop entries that carry nothing: `null` values and empty arrays.
/// Remaining keys keep their input order.
pub fn clean_payload(payload: Map<String, Value>) -> Map<String, Value> {
    payload
        .into_iter()
        .filter(|(_, value)| !is_vacant(value))
        .collect()
}

/// Clean `params`, then flatten into ordered query pairs. Array values are
/// emitted once per element under the same key (`statuses[]=a&statuses[]=b`).
pub fn normalize_query(params: Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in clean_payload(params) {
        match value {
            Value::Array(items) => {
                for item in items.iter().filter(|item| !item.is_null()) {
                    pairs.push((key.clone(), render_query_value(item)));
                }
            }
            other => pairs.push((key, render_query_value(&other))),
        }
    }
    pairs
}

fn is_vacant(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn render_query_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
