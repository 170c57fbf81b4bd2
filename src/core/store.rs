use std::any::Any;

use serde_json::Value;

use crate::core::errors::Result;

/// Trait defining the core operations of a storage backend
///
/// Items and documents live in separate namespaces. Document keys are the
/// ids derived by `core::document::document_key`.
pub trait Store: Send + Sync {
    /// Set an item, overwriting any previous value
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Get an item
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Remove an item, returning whether it existed
    fn remove_item(&mut self, key: &str) -> Result<bool>;

    /// Write a batch of documents in one step
    ///
    /// Keys are not checked for uniqueness here; existing documents under the
    /// same key are overwritten. `DataStore::insert` rejects duplicates first.
    fn put_documents(&mut self, documents: &[(String, Value)]) -> Result<()>;

    /// Check if a document key exists
    fn contains_document(&self, key: &str) -> Result<bool>;

    /// Get a document by key
    fn get_document(&self, key: &str) -> Result<Option<Value>>;

    /// All documents, in ascending key order
    fn scan_documents(&self) -> Result<Vec<(String, Value)>>;

    /// Remove documents by key, returning how many existed
    fn remove_documents(&mut self, keys: &[String]) -> Result<usize>;

    /// Count the documents in the store
    fn document_count(&self) -> Result<usize>;

    /// Remove every document
    fn clear_documents(&mut self) -> Result<()>;

    /// Flush changes (for persistent stores)
    fn flush(&self) -> Result<()>;

    fn as_any(&self) -> &dyn Any;
}
