use thiserror::Error;
use rudb::StoreError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(String),
}
