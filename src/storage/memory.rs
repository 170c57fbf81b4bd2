//! In-memory store for rudb
//!
//! This module provides a simple in-memory implementation
//! of the storage backend.

use std::any::Any;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::core::errors::Result;
use crate::core::store::Store;

/// An in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Documents by key
    documents: BTreeMap<String, Value>,
    /// Key-value items
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl Store for MemoryStore {
    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn remove_item(&mut self, key: &str) -> Result<bool> {
        Ok(self.items.remove(key).is_some())
    }

    fn put_documents(&mut self, documents: &[(String, Value)]) -> Result<()> {
        self.documents.extend(documents.iter().cloned());
        Ok(())
    }

    fn contains_document(&self, key: &str) -> Result<bool> {
        Ok(self.documents.contains_key(key))
    }

    fn get_document(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.documents.get(key).cloned())
    }

    fn scan_documents(&self) -> Result<Vec<(String, Value)>> {
        let pairs = self.documents.iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(pairs)
    }

    fn remove_documents(&mut self, keys: &[String]) -> Result<usize> {
        let removed = keys.iter()
            .filter(|key| self.documents.remove(key.as_str()).is_some())
            .count();

        Ok(removed)
    }

    fn document_count(&self) -> Result<usize> {
        Ok(self.documents.len())
    }

    fn clear_documents(&mut self) -> Result<()> {
        self.documents.clear();
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        // No-op for in-memory store
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_items_are_separate_from_documents() {
        let mut store = MemoryStore::new();
        store.set_item("k", "v").unwrap();
        store.put_documents(&[("k".to_string(), json!({"id": "k"}))]).unwrap();

        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.document_count().unwrap(), 1);

        assert!(store.remove_item("k").unwrap());
        assert!(!store.remove_item("k").unwrap());
        assert!(store.contains_document("k").unwrap());
    }

    #[test]
    fn test_scan_is_key_ordered() {
        let mut store = MemoryStore::new();
        store.put_documents(&[
            ("b".to_string(), json!({"id": "b"})),
            ("a".to_string(), json!({"id": "a"})),
        ]).unwrap();

        let keys: Vec<String> = store.scan_documents().unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_put_writes_whole_batch() {
        let mut store = MemoryStore::new();
        store.put_documents(&[
            ("c".to_string(), json!({"id": "c"})),
            ("a".to_string(), json!({"id": "a", "v": 2})),
        ]).unwrap();

        assert_eq!(store.document_count().unwrap(), 2);
        assert_eq!(store.get_document("a").unwrap(), Some(json!({"id": "a", "v": 2})));
    }

    #[test]
    fn test_remove_documents_counts_existing() {
        let mut store = MemoryStore::new();
        store.put_documents(&[("a".to_string(), json!({"id": "a"}))]).unwrap();

        let removed = store.remove_documents(&["a".to_string(), "zz".to_string()]).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.document_count().unwrap(), 0);
    }
}
