use serde_json::{Map, Value};

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Case-insensitive substring test used by every name filter.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn json_to_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub fn to_pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contains_ignore_case_matches_any_casing() {
        assert!(contains_ignore_case("Engineering", "ENG"));
        assert!(contains_ignore_case("roadmap", "Road"));
        assert!(!contains_ignore_case("Sales", "eng"));
    }

    #[test]
    fn json_to_map_discards_non_objects() {
        assert!(json_to_map(json!([1, 2])).is_empty());
        assert_eq!(json_to_map(json!({ "a": 1 })).len(), 1);
    }
}
