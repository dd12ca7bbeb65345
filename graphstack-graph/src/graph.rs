//! The graph store handle: watches, staging, commit, and dispatch wiring.

use crate::classify;
use crate::constraint::{AlwaysValid, ConstraintValidator};
use crate::delegate::GraphDelegate;
use crate::error::{GraphError, GraphResult};
use crate::watch::WatchRegistry;
use crate::working::WorkingSet;
use graphstack_storage::{ChangeSubscription, Engine};
use graphstack_types::{ChangeSet, Filter, NodeKind, Record, RecordId};
use parking_lot::{Mutex, RwLock};
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

type DelegateSlot = Arc<RwLock<Option<Arc<dyn GraphDelegate>>>>;

/// A handle to a watched graph store.
///
/// The graph owns its storage engine handle — there is no process-wide
/// shared store, and the store's lifetime is tied to the handles over it.
/// Several graphs may share one engine via [`Graph::with_engine`].
///
/// Watches, the delegate reference, and the working set all live on the
/// handle and die with it. Notification dispatch runs on a background task
/// that is torn down when the handle is dropped.
///
/// The graph must be used within a Tokio runtime: registering a watch and
/// the callback form of save spawn onto the current runtime.
pub struct Graph {
    engine: Engine,
    delegate: DelegateSlot,
    validator: RwLock<Arc<dyn ConstraintValidator>>,
    watching: Mutex<WatchRegistry>,
    working: Mutex<WorkingSet>,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl Graph {
    /// Opens a graph over the store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> GraphResult<Self> {
        Ok(Self::with_engine(Engine::open(path)?))
    }

    /// Opens a graph over the application-standard store location.
    pub fn open_default() -> GraphResult<Self> {
        Ok(Self::with_engine(Engine::open_default()?))
    }

    /// Opens a graph over a transient in-memory store, used by tests.
    pub fn open_in_memory() -> GraphResult<Self> {
        Ok(Self::with_engine(Engine::open_in_memory()?))
    }

    /// Creates a graph over an existing engine handle.
    #[must_use]
    pub fn with_engine(engine: Engine) -> Self {
        Self {
            engine,
            delegate: Arc::new(RwLock::new(None)),
            validator: RwLock::new(Arc::new(AlwaysValid)),
            watching: Mutex::new(WatchRegistry::default()),
            working: Mutex::new(WorkingSet::default()),
            pump: Mutex::new(None),
        }
    }

    /// Sets the delegate that receives change callbacks. One delegate per
    /// handle; setting a new one replaces the previous reference.
    pub fn set_delegate(&self, delegate: Arc<dyn GraphDelegate>) {
        *self.delegate.write() = Some(delegate);
    }

    /// Installs a constraint validator, replacing the default
    /// accept-everything one.
    pub fn set_validator(&self, validator: Arc<dyn ConstraintValidator>) {
        *self.validator.write() = validator;
    }

    // ── Watches ──────────────────────────────────────────────────

    /// Registers interest in records of `kind` whose `field` equals `value`.
    ///
    /// Returns true when the watch was already registered, in which case
    /// nothing changes — registration is idempotent and a duplicate never
    /// duplicates callback delivery. A new watch rebuilds the master filter
    /// and replaces the engine subscription wholesale with one scoped by the
    /// new filter.
    ///
    /// The master filter is snapshotted into the subscription at that
    /// moment: a registration concurrent with an in-flight notification
    /// takes effect from the next subscription onwards, not retroactively.
    pub fn watch(&self, kind: NodeKind, field: &str, value: &str) -> bool {
        let filter = {
            let mut watching = self.watching.lock();
            if watching.register(kind, field, value) {
                return true;
            }
            watching.master_filter()
        };
        debug!("watch added: {} {}={}", kind, field, value);
        self.resubscribe(filter);
        false
    }

    /// Watches entities with the given type tag.
    pub fn watch_entity(&self, node_type: &str) -> bool {
        self.watch(NodeKind::Entity, "type", node_type)
    }

    /// Watches actions with the given type tag.
    pub fn watch_action(&self, node_type: &str) -> bool {
        self.watch(NodeKind::Action, "type", node_type)
    }

    /// Watches bonds with the given type tag.
    pub fn watch_bond(&self, node_type: &str) -> bool {
        self.watch(NodeKind::Bond, "type", node_type)
    }

    // ── Working set ──────────────────────────────────────────────

    /// Stages a record for insertion at the next save.
    pub fn insert(&self, record: Record) {
        self.working.lock().insert(record);
    }

    /// Stages new state for an existing record at the next save.
    pub fn update(&self, record: Record) {
        self.working.lock().update(record);
    }

    /// Stages a record for archival at the next save. Archival is terminal:
    /// the record is removed from the store.
    pub fn archive(&self, record: Record) {
        self.working.lock().archive(record);
    }

    // ── Commit pipeline ──────────────────────────────────────────

    /// Commits the working set transactionally.
    ///
    /// An empty working set completes immediately without engaging
    /// validation or the engine. A constraint rejection returns
    /// [`GraphError::Constraint`] and leaves the working set intact.
    /// Completion happens after the engine's serialized commit, so a read
    /// issued afterwards sees the committed state; watched-change callbacks
    /// follow asynchronously on the dispatch context.
    ///
    /// # Panics
    ///
    /// Panics if the engine itself fails to commit. An engine-level commit
    /// failure is an invariant violation, not a recoverable result.
    pub async fn save(&self) -> GraphResult<()> {
        let Some(changes) = self.stage_for_commit()? else {
            return Ok(());
        };
        match self.engine.commit(changes).await {
            Ok(()) => Ok(()),
            Err(e) => panic!("storage engine commit failed: {e}"),
        }
    }

    /// Callback form of [`Graph::save`]: invokes `completion` with the
    /// outcome instead of returning it. The empty-working-set and
    /// constraint-rejection completions fire inline; a real commit completes
    /// from a spawned task after the engine has committed.
    pub fn save_with<F>(&self, completion: F)
    where
        F: FnOnce(GraphResult<()>) + Send + 'static,
    {
        let changes = match self.stage_for_commit() {
            Ok(None) => return completion(Ok(())),
            Ok(Some(changes)) => changes,
            Err(e) => return completion(Err(e)),
        };
        let engine = self.engine.clone();
        tokio::spawn(async move {
            match engine.commit(changes).await {
                Ok(()) => completion(Ok(())),
                Err(e) => panic!("storage engine commit failed: {e}"),
            }
        });
    }

    /// Validates and drains the working set. `None` means nothing to commit.
    /// On a constraint rejection the staged mutations stay put.
    fn stage_for_commit(&self) -> GraphResult<Option<ChangeSet>> {
        let mut working = self.working.lock();
        if working.is_empty() {
            return Ok(None);
        }
        let changes = working.to_change_set();
        let validator = self.validator.read().clone();
        if let Err(reason) = validator.validate(&changes) {
            warn!("constraint validation rejected commit: {}", reason);
            return Err(GraphError::Constraint(reason));
        }
        working.clear();
        Ok(Some(changes))
    }

    // ── Queries ──────────────────────────────────────────────────

    /// Returns every stored record matching the filter.
    pub async fn query(&self, filter: Filter) -> GraphResult<Vec<Record>> {
        Ok(self.engine.query(filter).await?)
    }

    /// Looks a stored record up by identity.
    pub async fn find(&self, id: RecordId) -> GraphResult<Option<Record>> {
        Ok(self.engine.find(id).await?)
    }

    // ── Subscription pump ────────────────────────────────────────

    /// Replaces the notification subscription with one scoped by `filter`
    /// and restarts the dispatch pump on it.
    fn resubscribe(&self, filter: Filter) {
        let mut pump = self.pump.lock();
        if let Some(old) = pump.take() {
            old.abort();
        }
        let subscription = self.engine.subscribe(filter);
        let delegate = Arc::clone(&self.delegate);
        *pump = Some(tokio::spawn(run_pump(subscription, delegate)));
    }
}

impl Drop for Graph {
    fn drop(&mut self) {
        if let Some(pump) = self.pump.lock().take() {
            pump.abort();
        }
    }
}

/// Receives change notifications for the life of one subscription and runs
/// the classifier over each. Classification uses the filter snapshot the
/// subscription was created with.
async fn run_pump(mut subscription: ChangeSubscription, delegate: DelegateSlot) {
    while let Some(changes) = subscription.recv().await {
        let delegate = delegate.read().clone();
        let Some(delegate) = delegate else {
            continue;
        };
        classify::dispatch(&changes, subscription.filter(), delegate.as_ref());
    }
}
