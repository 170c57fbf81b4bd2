//! Error types for rudb
//!
//! This module defines the various error types that can occur
//! during store operations.

use thiserror::Error;
use crate::core::path::PathError;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Path error: {0}")]
    PathError(#[from] PathError),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Document with key '{0}' already exists.")]
    DuplicateKey(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sled::Error> for StoreError {
    fn from(e: sled::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_message() {
        let err = StoreError::DuplicateKey("u-1".to_string());
        assert_eq!(err.to_string(), "Document with key 'u-1' already exists.");
    }

    #[test]
    fn test_path_error_conversion() {
        let err: StoreError = PathError::EmptyPath.into();
        assert!(matches!(err, StoreError::PathError(PathError::EmptyPath)));
    }
}
