//! Storage operation errors

use thiserror::Error;

/// Errors produced by the object store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Object too large: {size} bytes exceeds ceiling of {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("Media type not allowed: {0}")]
    DisallowedType(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object identifier: {0}")]
    InvalidIdentifier(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
