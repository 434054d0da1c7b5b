use crate::error::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the server-assigned identifier in serialized records
pub const ID_FIELD: &str = "id";
/// Key of the server-assigned creation timestamp in serialized records
pub const CREATED_AT_FIELD: &str = "createdAt";

/// A record stored in a collection
///
/// Serialized form must be a JSON object carrying `id` and `createdAt`.
/// Fields the caller may omit on create (arrays, counters) should carry
/// `#[serde(default)]` so the store can fill them in.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Human-readable kind used in not-found messages ("Post", "User")
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// Delete acknowledgment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

pub(crate) fn into_object(fields: Value) -> StoreResult<Map<String, Value>> {
    match fields {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidFields(format!(
            "expected a JSON object, got {}",
            type_name(&other)
        ))),
    }
}

/// Overlay top-level keys of `patch` onto `base`; nested values are replaced, not merged
pub(crate) fn shallow_merge(base: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        base.insert(key, value);
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shallow_merge_replaces_top_level_keys() {
        let mut base = into_object(json!({
            "id": "p1",
            "likes": ["u1"],
            "meta": { "a": 1, "b": 2 }
        }))
        .unwrap();
        let patch = into_object(json!({ "likes": [], "meta": { "a": 3 } })).unwrap();

        shallow_merge(&mut base, patch);

        assert_eq!(base["id"], json!("p1"));
        assert_eq!(base["likes"], json!([]));
        assert_eq!(base["meta"], json!({ "a": 3 }));
    }

    #[test]
    fn test_into_object_rejects_non_objects() {
        let err = into_object(json!([1, 2])).unwrap_err();
        assert!(matches!(err, StoreError::InvalidFields(msg) if msg.contains("array")));
    }
}
