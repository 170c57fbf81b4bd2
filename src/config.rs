//! Store configuration

use std::path::PathBuf;

/// Configuration for opening a `DataStore`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Database directory; `None` keeps everything in memory
    pub path: Option<PathBuf>,
    /// Fields to build equality indexes on
    pub indexes: Vec<String>,
    /// Flush to disk after every write (persistent stores only)
    pub flush_on_write: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: None,
            indexes: Vec::new(),
            flush_on_write: true,
        }
    }
}

impl StoreConfig {
    /// In-memory configuration
    pub fn in_memory() -> Self {
        StoreConfig::default()
    }

    /// Persist the store under `path`
    pub fn persistent<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add an equality index on `field`
    pub fn with_index<S: Into<String>>(mut self, field: S) -> Self {
        let field = field.into();
        if !self.indexes.contains(&field) {
            self.indexes.push(field);
        }
        self
    }

    /// Choose whether every write is flushed to disk
    pub fn flush_on_write(mut self, flush: bool) -> Self {
        self.flush_on_write = flush;
        self
    }
}
