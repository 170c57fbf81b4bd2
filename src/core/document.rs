//! Documents for rudb
//!
//! A document is a schema-less JSON object. Each one is stored under a key
//! taken from its `id` field, generated when the field is absent.

use serde_json::Value;
use uuid::Uuid;

use super::errors::{Result, StoreError};
use super::path::FieldPath;

/// Name of the field that carries a document's key
pub const ID_FIELD: &str = "id";

/// Derive the storage key of a document, assigning an `id` if it has none
///
/// String ids are used verbatim and numeric ids by their canonical decimal
/// text, so `1` and `1.0` share a key. String and numeric ids share one key
/// space: `"1"` and `1` name the same document key.
/// A missing or null id is replaced by a fresh v4 UUID written back into the
/// document.
pub fn document_key(document: &mut Value) -> Result<String> {
    let object = match document {
        Value::Object(map) => map,
        other => {
            return Err(StoreError::InvalidDocument(format!(
                "expected a JSON object, got {}",
                super::value::type_name(other)
            )));
        }
    };

    match object.get(ID_FIELD) {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(n)) => Ok(super::value::canonical_number(n)),
        None | Some(Value::Null) => {
            let id = Uuid::new_v4().to_string();
            object.insert(ID_FIELD.to_string(), Value::String(id.clone()));
            Ok(id)
        }
        Some(other) => Err(StoreError::InvalidDocument(format!(
            "'{}' must be a string or a number, got {}",
            ID_FIELD,
            super::value::type_name(other)
        ))),
    }
}

/// Look up a field of a document
///
/// The whole name is tried as a top-level key first; if that misses and the
/// name parses as a path, the path is walked.
pub fn field<'a>(document: &'a Value, name: &str) -> Option<&'a Value> {
    if let Some(value) = document.get(name) {
        return Some(value);
    }

    if !name.contains('.') && !name.contains('[') {
        return None;
    }

    name.parse::<FieldPath>()
        .ok()
        .and_then(|path| path.resolve(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_and_numeric_ids() {
        let mut doc = json!({"id": "u-1", "name": "alice"});
        assert_eq!(document_key(&mut doc).unwrap(), "u-1");

        let mut doc = json!({"id": 42});
        assert_eq!(document_key(&mut doc).unwrap(), "42");

        let mut doc = json!({"id": 42.0});
        assert_eq!(document_key(&mut doc).unwrap(), "42");
    }

    #[test]
    fn test_generated_id_is_written_back() {
        let mut doc = json!({"name": "bob"});
        let key = document_key(&mut doc).unwrap();

        assert_eq!(doc["id"], json!(key));
        assert!(Uuid::parse_str(&key).is_ok());

        let mut doc = json!({"id": null});
        let key = document_key(&mut doc).unwrap();
        assert_eq!(doc["id"], json!(key));
    }

    #[test]
    fn test_rejects_invalid_documents() {
        let mut scalar = json!(12);
        assert!(matches!(document_key(&mut scalar), Err(StoreError::InvalidDocument(_))));

        let mut bad_id = json!({"id": [1, 2]});
        assert!(matches!(document_key(&mut bad_id), Err(StoreError::InvalidDocument(_))));
    }

    #[test]
    fn test_field_lookup() {
        let doc = json!({
            "a": 1,
            "profile": {"city": "Lyon"},
            "dotted.key": "literal",
            "tags": ["x", "y"]
        });

        assert_eq!(field(&doc, "a"), Some(&json!(1)));
        assert_eq!(field(&doc, "profile.city"), Some(&json!("Lyon")));
        assert_eq!(field(&doc, "dotted.key"), Some(&json!("literal")));
        assert_eq!(field(&doc, "tags[1]"), Some(&json!("y")));
        assert_eq!(field(&doc, "missing"), None);
        assert_eq!(field(&doc, "profile..city"), None);
    }
}
