// src/core/index/value_index.rs
use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::core::document::field;
use crate::core::value::index_key;

/// Equality index over one document field
///
/// Maps the encoded value of the field to the keys of the documents holding
/// it. Documents where the field is missing, or holds an array or object,
/// are not entered.
#[derive(Debug, Clone)]
pub struct FieldIndex {
    /// Field name, as written in `where` clauses
    field: String,
    /// Encoded value -> document keys
    entries: BTreeMap<Vec<u8>, BTreeSet<String>>,
}

impl FieldIndex {
    /// Create an empty index on a field
    pub fn new<S: Into<String>>(field: S) -> Self {
        FieldIndex {
            field: field.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Add a document to the index; returns whether an entry was made
    pub fn add(&mut self, key: &str, document: &Value) -> bool {
        match field(document, &self.field).and_then(index_key) {
            Some(value_key) => self.entries
                .entry(value_key)
                .or_default()
                .insert(key.to_string()),
            None => false,
        }
    }

    /// Remove a document from the index; returns whether an entry was removed
    pub fn remove(&mut self, key: &str, document: &Value) -> bool {
        let value_key = match field(document, &self.field).and_then(index_key) {
            Some(value_key) => value_key,
            None => return false,
        };

        let removed = match self.entries.get_mut(&value_key) {
            Some(keys) => keys.remove(key),
            None => false,
        };

        // Drop empty buckets
        if self.entries.get(&value_key).map_or(false, BTreeSet::is_empty) {
            self.entries.remove(&value_key);
        }

        removed
    }

    /// Find the keys of documents whose field equals `value`
    ///
    /// Returns `None` when `value` cannot be looked up in an index.
    pub fn find_by_value(&self, value: &Value) -> Option<BTreeSet<String>> {
        let value_key = index_key(value)?;
        Some(self.entries.get(&value_key).cloned().unwrap_or_default())
    }

    /// Number of document keys held
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    /// Check if the index holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_and_find() {
        let mut index = FieldIndex::new("a");
        assert!(index.add("d1", &json!({"a": 1})));
        assert!(index.add("d2", &json!({"a": 1.0})));
        assert!(index.add("d3", &json!({"a": 2})));
        assert!(!index.add("d4", &json!({"b": 1})));
        assert!(!index.add("d5", &json!({"a": [1]})));

        let ones: Vec<String> = index.find_by_value(&json!(1)).unwrap().into_iter().collect();
        assert_eq!(ones, vec!["d1", "d2"]);
        assert_eq!(index.find_by_value(&json!(7)), Some(BTreeSet::new()));
        assert_eq!(index.find_by_value(&json!({"x": 1})), None);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_nested_field() {
        let mut index = FieldIndex::new("profile.city");
        index.add("u1", &json!({"profile": {"city": "Lyon"}}));

        let found = index.find_by_value(&json!("Lyon")).unwrap();
        assert!(found.contains("u1"));
    }

    #[test]
    fn test_remove_drops_empty_buckets() {
        let mut index = FieldIndex::new("a");
        let doc = json!({"a": "x"});
        index.add("d1", &doc);

        assert!(index.remove("d1", &doc));
        assert!(!index.remove("d1", &doc));
        assert!(index.is_empty());
    }
}
