//! Watched graph store core for graphstack.
//!
//! A [`Graph`] owns a storage engine handle, a registry of watches, and an
//! in-memory working set of pending record mutations. Callers declare
//! interest in records by kind and field value, stage inserts, updates, and
//! archives, then commit the working set transactionally. After each commit
//! the engine broadcasts what changed, and the graph classifies the watched
//! records and dispatches typed delegate callbacks.
//!
//! # Components
//!
//! - **Watch registry**: (kind, field, value) interests merged into one
//!   master filter
//! - **Change classifier**: filters each committed set through the master
//!   filter and dispatches per (kind, operation)
//! - **Commit pipeline**: no-op on an empty working set, pluggable constraint
//!   validation, then a serialized engine commit
//! - **Delegate contract**: nine optional callbacks, default no-ops
//!
//! # Example
//!
//! ```no_run
//! use graphstack_graph::{EntityRef, Graph, GraphDelegate};
//! use graphstack_types::Record;
//! use std::sync::Arc;
//!
//! struct Console;
//!
//! impl GraphDelegate for Console {
//!     fn did_insert_entity(&self, entity: EntityRef<'_>) {
//!         println!("inserted {} {}", entity.node_type(), entity.id());
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> graphstack_graph::GraphResult<()> {
//! let graph = Graph::open_in_memory()?;
//! graph.set_delegate(Arc::new(Console));
//! graph.watch_entity("user");
//!
//! graph.insert(Record::entity("user").with_property("active", true));
//! graph.save().await?;
//! # Ok(())
//! # }
//! ```

mod classify;
mod constraint;
mod delegate;
mod error;
mod graph;
mod watch;
mod working;

pub use constraint::ConstraintValidator;
pub use delegate::{ActionRef, BondRef, EntityRef, GraphDelegate};
pub use error::{GraphError, GraphResult};
pub use graph::Graph;

// Re-export the types callers need to build records and queries.
pub use graphstack_storage::Engine;
pub use graphstack_types::{ChangeSet, Filter, NodeKind, Record, RecordId, Timestamp};
