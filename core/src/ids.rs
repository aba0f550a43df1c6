//! Remote identifiers arrive as JSON strings or numbers depending on the
//! endpoint (team ids are numeric in some payloads). Locally they are always
//! strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// String form of an id-like JSON value. Blank strings count as absent.
pub fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// serde helper for optional id fields that accept `"123"` or `123`.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(value @ (Value::String(_) | Value::Number(_))) => Ok(id_from_value(&value)),
        Some(_) => Err(serde::de::Error::custom("expected a string or number id")),
    }
}

/// serde helper for id fields in remote documents; anything unusable becomes `""`.
pub fn deserialize_lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(id_from_value(&raw).unwrap_or_default())
}
