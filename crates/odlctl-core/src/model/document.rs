// ── Raw document access ──
//
// Required fields are read strictly, optional fields degrade to `None`.
// Controllers are inconsistent about scalar encoding (a port number may
// arrive as `"1"` or `1`), so scalar readers accept either form.

use serde_json::{Map, Value};

use crate::error::CoreError;

/// Field reader over one JSON object, tagged with the entity it describes
/// so errors name what was being built.
pub(crate) struct Fields<'a> {
    entity: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(entity: &'static str, doc: &'a Value) -> Result<Self, CoreError> {
        let map = doc.as_object().ok_or(CoreError::InvalidField {
            entity,
            field: "(document)".into(),
            expected: "object",
        })?;
        Ok(Self { entity, map })
    }

    /// First non-null value among `keys`.
    fn lookup(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|k| self.map.get(*k))
            .find(|v| !v.is_null())
    }

    // ── Required ────────────────────────────────────────────────────

    pub(crate) fn required(&self, key: &str) -> Result<&'a Value, CoreError> {
        self.lookup(&[key])
            .ok_or_else(|| CoreError::missing(self.entity, key))
    }

    pub(crate) fn required_string(&self, key: &str) -> Result<String, CoreError> {
        scalar_string(self.required(key)?).ok_or_else(|| CoreError::InvalidField {
            entity: self.entity,
            field: key.into(),
            expected: "string",
        })
    }

    pub(crate) fn required_u32(&self, key: &str) -> Result<u32, CoreError> {
        scalar_u32(self.required(key)?).ok_or_else(|| CoreError::InvalidField {
            entity: self.entity,
            field: key.into(),
            expected: "integer",
        })
    }

    pub(crate) fn required_array(&self, key: &str) -> Result<&'a [Value], CoreError> {
        self.required(key)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| CoreError::InvalidField {
                entity: self.entity,
                field: key.into(),
                expected: "array",
            })
    }

    // ── Optional ────────────────────────────────────────────────────

    pub(crate) fn optional(&self, keys: &[&str]) -> Option<Value> {
        self.lookup(keys).cloned()
    }

    pub(crate) fn optional_object(&self, key: &str) -> Option<Map<String, Value>> {
        self.lookup(&[key]).and_then(Value::as_object).cloned()
    }

    pub(crate) fn optional_string(&self, keys: &[&str]) -> Option<String> {
        self.lookup(keys).and_then(scalar_string)
    }

    pub(crate) fn optional_u32(&self, keys: &[&str]) -> Option<u32> {
        self.lookup(keys).and_then(scalar_u32)
    }

    pub(crate) fn optional_u64(&self, keys: &[&str]) -> Option<u64> {
        self.lookup(keys).and_then(scalar_u64)
    }

    pub(crate) fn optional_bool(&self, keys: &[&str]) -> Option<bool> {
        match self.lookup(keys)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// An array that may legitimately be absent; absence reads as empty.
    pub(crate) fn optional_array(&self, key: &str) -> &'a [Value] {
        self.lookup(&[key])
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

// ── Scalar coercion ─────────────────────────────────────────────────

pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn scalar_u32(value: &Value) -> Option<u32> {
    scalar_u64(value).and_then(|n| u32::try_from(n).ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn required_missing_names_entity_and_field() {
        let doc = json!({ "name": "x" });
        let fields = Fields::new("Flow", &doc).unwrap();
        match fields.required_string("id") {
            Err(CoreError::MissingRequiredField { entity, field }) => {
                assert_eq!(entity, "Flow");
                assert_eq!(field, "id");
            }
            other => panic!("expected MissingRequiredField, got: {other:?}"),
        }
    }

    #[test]
    fn null_counts_as_absent() {
        let doc = json!({ "id": null, "hard-timeout": null });
        let fields = Fields::new("Flow", &doc).unwrap();
        assert!(fields.required("id").is_err());
        assert_eq!(fields.optional_u32(&["hard-timeout"]), None);
    }

    #[test]
    fn scalars_accept_string_or_number() {
        let doc = json!({ "a": "7", "b": 7, "c": "seven" });
        let fields = Fields::new("Table", &doc).unwrap();
        assert_eq!(fields.required_u32("a").unwrap(), 7);
        assert_eq!(fields.required_u32("b").unwrap(), 7);
        assert!(matches!(
            fields.required_u32("c"),
            Err(CoreError::InvalidField { .. })
        ));
        assert_eq!(fields.optional_string(&["b"]).as_deref(), Some("7"));
    }

    #[test]
    fn aliases_resolve_in_order() {
        let doc = json!({ "hard_timeout": 5 });
        let fields = Fields::new("Flow", &doc).unwrap();
        assert_eq!(fields.optional_u32(&["hard-timeout", "hard_timeout"]), Some(5));
    }

    #[test]
    fn non_object_document_is_rejected() {
        let doc = json!([1, 2]);
        assert!(Fields::new("Node", &doc).is_err());
    }
}
