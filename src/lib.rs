//! rudb: an embedded document and key-value store
//!
//! This crate provides a store with two facets: string items addressed by
//! key (`set_item`/`get_item`) and schema-less JSON documents with bulk
//! insert, equality filters, sorting and pagination (`insert`/`find_documents`).

pub mod core;
pub mod storage;
pub mod config;
pub mod bench;

use std::collections::HashSet;
use std::path::Path as StdPath;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info};
use serde_json::Value;

use crate::core::document::document_key;
use crate::core::index::{IndexSystem, QueryPlan};
use crate::core::store::Store;
use crate::storage::{MemoryStore, PersistentStore};

/// Backend plus the indexes derived from it
struct Inner {
    store: Box<dyn Store>,
    indexes: IndexSystem,
}

impl Inner {
    /// Documents selected by the query's `where` clause, in key order
    fn matching(&self, query: &Query) -> Result<Vec<(String, Value)>> {
        match self.indexes.plan(query) {
            QueryPlan::IndexLookup { field, keys } => {
                debug!("DataStore: index on '{}' yields {} candidates", field, keys.len());
                let mut matches = Vec::with_capacity(keys.len());
                for key in keys {
                    if let Some(document) = self.store.get_document(&key)? {
                        if query.matches(&document) {
                            matches.push((key, document));
                        }
                    }
                }
                Ok(matches)
            }
            QueryPlan::FullScan => {
                let matches = self.store
                    .scan_documents()?
                    .into_iter()
                    .filter(|(_, document)| query.matches(document))
                    .collect();
                Ok(matches)
            }
        }
    }
}

/// Main API for rudb
pub struct DataStore {
    inner: RwLock<Inner>,
}

impl DataStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        DataStore::from_store(Box::new(MemoryStore::new()))
    }

    /// Open a persistent store at the given path
    pub fn open<P: AsRef<StdPath>>(path: P) -> Result<Self> {
        DataStore::with_config(StoreConfig::default().persistent(path.as_ref()))
    }

    /// Open a store as described by `config`
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        for field in &config.indexes {
            field.parse::<FieldPath>()?;
        }

        let store: Box<dyn Store> = match &config.path {
            Some(path) => Box::new(PersistentStore::open_with(path.clone(), config.flush_on_write)?),
            None => Box::new(MemoryStore::new()),
        };

        let data_store = DataStore::from_store(store);
        if !config.indexes.is_empty() {
            let mut inner = data_store.write()?;
            for field in &config.indexes {
                inner.indexes.create_index(field, &[]);
            }
            let documents = inner.store.scan_documents()?;
            inner.indexes.rebuild(&documents);
        }

        info!("DataStore ready ({} indexes)", config.indexes.len());
        Ok(data_store)
    }

    /// Wrap an existing backend
    pub fn from_store(store: Box<dyn Store>) -> Self {
        DataStore {
            inner: RwLock::new(Inner {
                store,
                indexes: IndexSystem::new(),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Internal("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Internal("store lock poisoned".to_string()))
    }

    /// Store a value under a key, overwriting any previous value
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.write()?.store.set_item(key, value)
    }

    /// Get the value stored under a key
    pub fn get_item(&self, key: &str) -> Result<String> {
        self.read()?
            .store
            .get_item(key)?
            .ok_or_else(|| StoreError::ItemNotFound(key.to_string()))
    }

    /// Remove the value stored under a key
    pub fn remove_item(&self, key: &str) -> Result<()> {
        if self.write()?.store.remove_item(key)? {
            Ok(())
        } else {
            Err(StoreError::ItemNotFound(key.to_string()))
        }
    }

    /// Insert a batch of documents
    ///
    /// The whole batch is validated before anything is written: every
    /// document must be an object with a usable `id` that is not already
    /// taken. Returns the number of documents inserted.
    pub fn insert(&self, documents: Vec<Value>) -> Result<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        let mut inner = self.write()?;
        let mut seen = HashSet::with_capacity(documents.len());
        let mut batch = Vec::with_capacity(documents.len());

        for mut document in documents {
            let key = document_key(&mut document)?;
            if !seen.insert(key.clone()) || inner.store.contains_document(&key)? {
                return Err(StoreError::DuplicateKey(key));
            }
            batch.push((key, document));
        }

        inner.store.put_documents(&batch)?;
        inner.indexes.add_documents(&batch);

        debug!("DataStore: inserted {} documents", batch.len());
        Ok(batch.len())
    }

    /// Get a document by its id
    pub fn get_document(&self, id: &str) -> Result<Value> {
        self.read()?
            .store
            .get_document(id)?
            .ok_or_else(|| StoreError::DocumentNotFound(id.to_string()))
    }

    /// Find documents matching a query, sorted and paginated
    pub fn find_documents(&self, query: &Query) -> Result<FindResults> {
        let matches = self.read()?.matching(query)?;
        let results = FindResults::from_matches(query, matches);

        debug!(
            "DataStore: find matched {} documents, returning {}",
            results.total_count,
            results.documents.len()
        );
        Ok(results)
    }

    /// Delete documents matching the query's `where` clause
    ///
    /// A query without a `where` clause deletes nothing. Returns the number
    /// of documents removed.
    pub fn delete(&self, query: &Query) -> Result<usize> {
        if query.where_clause().is_none() {
            return Ok(0);
        }

        let mut inner = self.write()?;
        let matches = inner.matching(query)?;
        if matches.is_empty() {
            return Ok(0);
        }

        let keys: Vec<String> = matches.iter().map(|(key, _)| key.clone()).collect();
        let removed = inner.store.remove_documents(&keys)?;
        inner.indexes.remove_documents(&matches);

        debug!("DataStore: deleted {} documents", removed);
        Ok(removed)
    }

    /// Number of documents in the store
    pub fn size(&self) -> Result<usize> {
        self.read()?.store.document_count()
    }

    /// Remove every document; items are kept
    pub fn clear(&self) -> Result<()> {
        let mut inner = self.write()?;
        inner.store.clear_documents()?;
        inner.indexes.clear();
        Ok(())
    }

    /// Build an equality index on a field
    pub fn create_index(&self, field: &str) -> Result<()> {
        field.parse::<FieldPath>()?;

        let mut inner = self.write()?;
        if inner.indexes.has_index(field) {
            return Ok(());
        }
        let documents = inner.store.scan_documents()?;
        inner.indexes.create_index(field, &documents);
        Ok(())
    }

    /// Get index statistics
    pub fn index_stats(&self) -> Result<IndexStats> {
        Ok(self.read()?.indexes.stats())
    }

    /// Check whether the store is backed by disk
    pub fn is_persistent(&self) -> Result<bool> {
        Ok(self.read()?.store.as_any().downcast_ref::<PersistentStore>().is_some())
    }

    /// Flush changes to disk (no-op for in-memory store)
    pub fn flush(&self) -> Result<()> {
        self.read()?.store.flush()
    }
}

impl Default for DataStore {
    fn default() -> Self {
        DataStore::new()
    }
}

// Re-export the main types for convenience
pub use crate::core::path::FieldPath;
pub use crate::core::query::{FindResults, Query};
pub use crate::core::errors::{Result, StoreError};
pub use crate::core::index::IndexStats;
pub use crate::config::StoreConfig;
