//! SQLite storage engine for graphstack.
//!
//! Provides durable record storage behind an explicitly owned engine handle.
//! All commands — queries, lookups, transactional commits — funnel through
//! one dedicated engine thread that owns the SQLite connection, so at most
//! one commit is ever in flight and callers can enqueue work from any thread.
//!
//! # Architecture
//!
//! - Records are stored as rows with their kind discriminator, type tag, and
//!   a JSON property bag
//! - A successful commit broadcasts the committed [`ChangeSet`] to
//!   subscribers on the engine's own dispatch context, fire-and-forget
//! - Subscriptions are owned objects scoped by a filter snapshot; dropping
//!   one unsubscribes
//! - Single schema version, recorded in `PRAGMA user_version`; there is no
//!   migration support
//!
//! [`ChangeSet`]: graphstack_types::ChangeSet

mod engine;
mod error;
mod store;

pub use engine::{ChangeSubscription, Engine};
pub use error::{StorageError, StorageResult};
