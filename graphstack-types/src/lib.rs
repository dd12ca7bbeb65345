//! Core type definitions for graphstack.
//!
//! This crate defines the fundamental, storage-agnostic types shared by the
//! engine and the graph layer:
//! - Record identifiers (UUID v7)
//! - Node kinds and records (kind discriminator, type tag, property bag)
//! - Structured filter expressions (the watch predicate language)
//! - Change sets (the unit of commit and of change notification)
//!
//! Domain-specific meaning of node types and properties belongs to callers,
//! not here.

mod change;
mod filter;
mod ids;
mod record;
mod timestamp;

pub use change::ChangeSet;
pub use filter::Filter;
pub use ids::RecordId;
pub use record::{NodeKind, Record};
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown node kind: {0}")]
    UnknownKind(String),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
