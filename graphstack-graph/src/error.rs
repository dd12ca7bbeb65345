//! Error types for the graph layer.

use graphstack_storage::StorageError;
use thiserror::Error;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur in graph operations.
///
/// Only `Constraint` is produced by the commit pipeline — it is the one
/// recoverable commit failure, and the working set is left intact when it is
/// returned. Engine-level commit failures do not appear here: they are
/// invariant violations and abort instead (see [`Graph::save`]).
///
/// [`Graph::save`]: crate::Graph::save
#[derive(Debug, Error)]
pub enum GraphError {
    /// A pluggable constraint rejected the pending change set.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// A storage error surfaced on the query path.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
