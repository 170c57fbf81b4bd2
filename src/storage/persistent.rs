// src/storage/persistent.rs

use std::any::Any;
use std::path::PathBuf;

use bincode::{serialize, deserialize};
use log::{debug, info};
use serde_json::Value;
use sled::{Batch, Db, Tree};

use crate::core::errors::{Result, StoreError};
use crate::core::store::Store;

const DOCUMENTS_TREE: &str = "documents";
const ITEMS_TREE: &str = "items";

/// A persistent store using sled
///
/// Documents are kept as JSON bytes in the `documents` tree; items are
/// bincode-encoded strings in the `items` tree. Both are keyed by the raw
/// UTF-8 bytes of their key.
pub struct PersistentStore {
    /// The underlying sled database
    db: Db,
    documents: Tree,
    items: Tree,
    /// Flush to disk after every mutating call
    flush_on_write: bool,
}

impl PersistentStore {
    /// Open a persistent store at the given path
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        Self::open_with(path, true)
    }

    /// Open a persistent store, choosing whether writes are flushed eagerly
    pub fn open_with<P: Into<PathBuf>>(path: P, flush_on_write: bool) -> Result<Self> {
        let path = path.into();
        let db = sled::open(&path)
            .map_err(|e| StoreError::Storage(format!("Failed to open database at {:?}: {}", path, e)))?;
        let documents = db.open_tree(DOCUMENTS_TREE)?;
        let items = db.open_tree(ITEMS_TREE)?;

        info!(
            "Opened persistent store at {:?} ({} documents, {} items)",
            path,
            documents.len(),
            items.len()
        );

        Ok(PersistentStore {
            db,
            documents,
            items,
            flush_on_write,
        })
    }

    fn after_write(&self) -> Result<()> {
        if self.flush_on_write {
            self.db.flush()?;
        }
        Ok(())
    }

    fn decode_document(bytes: &[u8]) -> Result<Value> {
        serde_json::from_slice(bytes)
            .map_err(|e| StoreError::DeserializationError(format!("Failed to decode document: {}", e)))
    }

    fn decode_key(bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| StoreError::DeserializationError(format!("Invalid document key: {}", e)))
    }
}

impl Store for PersistentStore {
    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let value_bytes = serialize(value)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;

        self.items.insert(key.as_bytes(), value_bytes)?;
        self.after_write()
    }

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match self.items.get(key.as_bytes())? {
            Some(bytes) => {
                let value: String = deserialize(&bytes)
                    .map_err(|e| StoreError::DeserializationError(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn remove_item(&mut self, key: &str) -> Result<bool> {
        let existed = self.items.remove(key.as_bytes())?.is_some();
        if existed {
            self.after_write()?;
        }
        Ok(existed)
    }

    fn put_documents(&mut self, documents: &[(String, Value)]) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }

        let mut batch = Batch::default();
        for (key, document) in documents {
            let bytes = serde_json::to_vec(document)
                .map_err(|e| StoreError::SerializationError(e.to_string()))?;
            batch.insert(key.as_bytes(), bytes);
        }

        debug!("PersistentStore: applying batch of {} documents", documents.len());
        self.documents.apply_batch(batch)?;
        self.after_write()
    }

    fn contains_document(&self, key: &str) -> Result<bool> {
        Ok(self.documents.contains_key(key.as_bytes())?)
    }

    fn get_document(&self, key: &str) -> Result<Option<Value>> {
        self.documents
            .get(key.as_bytes())?
            .map(|bytes| Self::decode_document(&bytes))
            .transpose()
    }

    fn scan_documents(&self) -> Result<Vec<(String, Value)>> {
        let mut pairs = Vec::with_capacity(self.documents.len());

        for item in self.documents.iter() {
            let (key_bytes, value_bytes) = item?;
            pairs.push((Self::decode_key(&key_bytes)?, Self::decode_document(&value_bytes)?));
        }

        Ok(pairs)
    }

    fn remove_documents(&mut self, keys: &[String]) -> Result<usize> {
        let mut removed = 0;
        let mut batch = Batch::default();

        for key in keys {
            if self.documents.contains_key(key.as_bytes())? {
                batch.remove(key.as_bytes());
                removed += 1;
            }
        }

        if removed > 0 {
            self.documents.apply_batch(batch)?;
            self.after_write()?;
        }

        Ok(removed)
    }

    fn document_count(&self) -> Result<usize> {
        Ok(self.documents.len())
    }

    fn clear_documents(&mut self) -> Result<()> {
        self.documents.clear()?;
        self.after_write()
    }

    fn flush(&self) -> Result<()> {
        self.db.flush()?;
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
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, PersistentStore) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = PersistentStore::open(temp_dir.path()).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_items_round_trip() {
        let (_dir, mut store) = create_test_store();
        let value = "{ foo: 'bar', baz: 42 }";

        store.set_item("key1", value).unwrap();
        assert_eq!(store.get_item("key1").unwrap().as_deref(), Some(value));
        assert_eq!(store.get_item("key2").unwrap(), None);

        assert!(store.remove_item("key1").unwrap());
        assert_eq!(store.get_item("key1").unwrap(), None);
    }

    #[test]
    fn test_documents_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();

        {
            let mut store = PersistentStore::open(temp_dir.path()).unwrap();
            store.put_documents(&[
                ("b".to_string(), json!({"id": "b", "n": 2})),
                ("a".to_string(), json!({"id": "a", "n": 1})),
            ]).unwrap();
            store.set_item("k", "v").unwrap();
        }

        let store = PersistentStore::open(temp_dir.path()).unwrap();
        assert_eq!(store.document_count().unwrap(), 2);
        assert_eq!(store.get_document("a").unwrap(), Some(json!({"id": "a", "n": 1})));
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));

        let keys: Vec<String> = store.scan_documents().unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_batch_is_applied_in_one_step() {
        let (_dir, mut store) = create_test_store();
        store.put_documents(&[
            ("new".to_string(), json!({"id": "new"})),
            ("a".to_string(), json!({"id": "a"})),
        ]).unwrap();

        assert!(store.contains_document("new").unwrap());
        assert_eq!(store.document_count().unwrap(), 2);
    }

    #[test]
    fn test_remove_and_clear() {
        let (_dir, mut store) = create_test_store();
        store.put_documents(&[
            ("a".to_string(), json!({"id": "a"})),
            ("b".to_string(), json!({"id": "b"})),
            ("c".to_string(), json!({"id": "c"})),
        ]).unwrap();

        assert_eq!(store.remove_documents(&["a".to_string(), "x".to_string()]).unwrap(), 1);
        assert_eq!(store.document_count().unwrap(), 2);

        store.clear_documents().unwrap();
        assert_eq!(store.document_count().unwrap(), 0);
    }
}
