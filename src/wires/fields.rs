//! Field sets: the loosely typed key/value maps handlers work with

use serde_json::{Map, Value};

/// Ordered string-keyed map of JSON values
pub type FieldSet = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Build a field set from a `json!` object; anything else gives an empty set
pub fn from_json(value: Value) -> FieldSet {
    match value {
        Value::Object(map) => map,
        _ => FieldSet::new(),
    }
}

/// Decode a posted request body.
///
/// An empty or whitespace-only body is an empty object.
pub fn decode_body(body: &[u8]) -> Result<FieldSet, BodyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(FieldSet::new());
    }
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(map) => Ok(map),
        other => Err(BodyError::NotAnObject(kind(&other))),
    }
}

/// Shallow merge: posted keys override defaults, default-only keys stay,
/// posted-only keys are appended.
pub fn merge(mut defaults: FieldSet, posted: FieldSet) -> FieldSet {
    for (key, value) in posted {
        defaults.insert(key, value);
    }
    defaults
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_overrides_and_preserves() {
        let defaults = from_json(json!({"name": "Joe", "age": "27"}));
        let posted = from_json(json!({"age": "34"}));
        let merged = merge(defaults, posted);
        assert_eq!(Value::Object(merged.clone()), json!({"name": "Joe", "age": "34"}));
        assert_eq!(
            serde_json::to_string(&merged).unwrap(),
            r#"{"name":"Joe","age":"34"}"#
        );
    }

    #[test]
    fn test_merge_appends_new_keys() {
        let defaults = from_json(json!({"name": "Joe"}));
        let posted = from_json(json!({"random": "1"}));
        let merged = merge(defaults, posted);
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["name", "random"]);
    }

    #[test]
    fn test_merge_is_shallow() {
        let defaults = from_json(json!({"user": {"name": "Joe", "age": 27}}));
        let posted = from_json(json!({"user": {"age": 34}}));
        let merged = merge(defaults, posted);
        assert_eq!(merged["user"], json!({"age": 34}));
    }

    #[test]
    fn test_decode_body() {
        assert!(decode_body(b"").unwrap().is_empty());
        assert!(decode_body(b"  \n").unwrap().is_empty());
        assert_eq!(decode_body(br#"{"age":"34"}"#).unwrap()["age"], "34");
        assert!(matches!(decode_body(b"{not json"), Err(BodyError::Json(_))));
        assert!(matches!(
            decode_body(b"[1,2]"),
            Err(BodyError::NotAnObject("an array"))
        ));
    }

    #[test]
    fn test_from_json_non_object() {
        assert!(from_json(json!([1, 2])).is_empty());
    }
}
