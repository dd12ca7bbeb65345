//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization/deserialization error for the property bag.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored row carries a kind discriminator outside the closed set.
    /// This indicates store corruption or a schema/code mismatch, not a
    /// recoverable condition.
    #[error("unknown node kind in store: {0}")]
    UnknownKind(String),

    /// A stored row carries an id that does not parse as a UUID.
    #[error("invalid record id in store: {0}")]
    InvalidRecordId(#[from] uuid::Error),

    /// The store file was written by a different schema version.
    #[error("unsupported schema version: {found}")]
    SchemaVersion { found: i32 },

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The engine thread has shut down and can no longer accept commands.
    #[error("storage engine closed")]
    EngineClosed,
}
