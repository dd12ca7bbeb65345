//! The storage engine handle and its serialized command loop.

use crate::store::NodeStore;
use crate::{StorageError, StorageResult};
use graphstack_types::{ChangeSet, Filter, Record, RecordId};
use std::path::Path;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

/// Fixed file name for the default store location.
const STORE_FILE_NAME: &str = "graphstack.sqlite";

/// Buffered notifications per subscriber before lagging sets in.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

enum Command {
    Query {
        filter: Filter,
        reply: oneshot::Sender<StorageResult<Vec<Record>>>,
    },
    Find {
        id: RecordId,
        reply: oneshot::Sender<StorageResult<Option<Record>>>,
    },
    Commit {
        changes: ChangeSet,
        reply: oneshot::Sender<StorageResult<()>>,
    },
}

/// Handle to the storage engine.
///
/// The handle is cheap to clone; every clone talks to the same engine thread,
/// which owns the SQLite connection and executes commands one at a time in
/// arrival order. Command replies are sent from the engine thread after the
/// command has executed, so a caller that has observed a commit reply is
/// guaranteed that any later read sees the committed state.
///
/// The engine thread shuts down and closes the store when the last handle is
/// dropped.
#[derive(Clone)]
pub struct Engine {
    commands: mpsc::UnboundedSender<Command>,
    changes: broadcast::Sender<ChangeSet>,
}

impl Engine {
    /// Opens (creating if necessary) an engine over the store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let store = NodeStore::open(path.as_ref())?;
        info!("storage engine opened at {}", path.as_ref().display());
        Self::spawn(store)
    }

    /// Opens an engine over the application-standard store location:
    /// `graphstack.sqlite` in the platform data directory.
    pub fn open_default() -> StorageResult<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| {
                StorageError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no platform data directory",
                ))
            })?
            .join("graphstack");
        std::fs::create_dir_all(&dir)?;
        Self::open(dir.join(STORE_FILE_NAME))
    }

    /// Opens an engine over a transient in-memory store, used by tests.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::spawn(NodeStore::open_in_memory()?)
    }

    fn spawn(mut store: NodeStore) -> StorageResult<Self> {
        let (commands, mut rx) = mpsc::unbounded_channel::<Command>();
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        let change_tx = changes.clone();

        // Detached on purpose: the thread exits once every handle is gone
        // and the command channel closes.
        let _ = std::thread::Builder::new()
            .name("graphstack-engine".into())
            .spawn(move || {
                while let Some(command) = rx.blocking_recv() {
                    match command {
                        Command::Query { filter, reply } => {
                            let _ = reply.send(store.query(&filter));
                        }
                        Command::Find { id, reply } => {
                            let _ = reply.send(store.find(&id));
                        }
                        Command::Commit { changes, reply } => {
                            let result = store.apply(&changes);
                            let committed = result.is_ok();
                            let _ = reply.send(result);
                            if committed {
                                // Fire-and-forget; an Err only means there are
                                // currently no subscribers.
                                let _ = change_tx.send(changes);
                            }
                        }
                    }
                }
                debug!("engine thread shutting down");
            })?;

        Ok(Self { commands, changes })
    }

    /// Returns every record matching the filter.
    pub async fn query(&self, filter: Filter) -> StorageResult<Vec<Record>> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Query { filter, reply })?;
        rx.await.map_err(|_| StorageError::EngineClosed)?
    }

    /// Looks a record up by identity.
    pub async fn find(&self, id: RecordId) -> StorageResult<Option<Record>> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Find { id, reply })?;
        rx.await.map_err(|_| StorageError::EngineClosed)?
    }

    /// Commits a change set transactionally.
    ///
    /// On success the committed change set is broadcast to subscribers
    /// afterwards, asynchronously, on the engine's own schedule.
    pub async fn commit(&self, changes: ChangeSet) -> StorageResult<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Commit { changes, reply })?;
        rx.await.map_err(|_| StorageError::EngineClosed)?
    }

    /// Subscribes to post-commit change notifications, scoped by a filter
    /// snapshot.
    ///
    /// The engine delivers every committed change set to every live
    /// subscription; the filter rides along as the snapshot the consumer
    /// should classify against. Dropping the subscription unsubscribes.
    pub fn subscribe(&self, filter: Filter) -> ChangeSubscription {
        ChangeSubscription {
            filter,
            receiver: self.changes.subscribe(),
        }
    }

    fn send(&self, command: Command) -> StorageResult<()> {
        self.commands
            .send(command)
            .map_err(|_| StorageError::EngineClosed)
    }
}

/// An owned subscription to the engine's change notifications.
///
/// Carries the filter the subscription was scoped with at creation time.
/// Notifications are delivered with no backpressure and no deadline; a
/// subscriber that falls more than the channel capacity behind loses the
/// oldest notifications.
pub struct ChangeSubscription {
    filter: Filter,
    receiver: broadcast::Receiver<ChangeSet>,
}

impl ChangeSubscription {
    /// The filter snapshot this subscription was created with.
    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Receives the next change notification, or `None` once the engine has
    /// shut down.
    pub async fn recv(&mut self) -> Option<ChangeSet> {
        loop {
            match self.receiver.recv().await {
                Ok(changes) => return Some(changes),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("change subscriber lagged, {} notifications dropped", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
