//! The delegate contract and the borrowed record views it receives.

use graphstack_types::{Record, RecordId, Timestamp};
use serde_json::Value;

/// A borrowed view over an entity record.
///
/// Views are constructed by the classifier for the duration of a delegate
/// callback; they borrow the record without copying its data. Callers that
/// need the record beyond the callback can clone it via [`EntityRef::record`].
#[derive(Debug, Clone, Copy)]
pub struct EntityRef<'a> {
    record: &'a Record,
}

impl<'a> EntityRef<'a> {
    pub(crate) fn new(record: &'a Record) -> Self {
        Self { record }
    }

    /// The record's identity.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.record.id
    }

    /// The caller-defined type tag.
    #[must_use]
    pub fn node_type(&self) -> &'a str {
        &self.record.node_type
    }

    /// When the record was created.
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.record.created_at
    }

    /// The property value for `key`, if set.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&'a Value> {
        self.record.property(key)
    }

    /// The underlying record.
    #[must_use]
    pub fn record(&self) -> &'a Record {
        self.record
    }
}

/// A borrowed view over an action record.
#[derive(Debug, Clone, Copy)]
pub struct ActionRef<'a> {
    record: &'a Record,
}

impl<'a> ActionRef<'a> {
    pub(crate) fn new(record: &'a Record) -> Self {
        Self { record }
    }

    /// The record's identity.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.record.id
    }

    /// The caller-defined type tag.
    #[must_use]
    pub fn node_type(&self) -> &'a str {
        &self.record.node_type
    }

    /// When the record was created.
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.record.created_at
    }

    /// The property value for `key`, if set.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&'a Value> {
        self.record.property(key)
    }

    /// The underlying record.
    #[must_use]
    pub fn record(&self) -> &'a Record {
        self.record
    }
}

/// A borrowed view over a bond record.
#[derive(Debug, Clone, Copy)]
pub struct BondRef<'a> {
    record: &'a Record,
}

impl<'a> BondRef<'a> {
    pub(crate) fn new(record: &'a Record) -> Self {
        Self { record }
    }

    /// The record's identity.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.record.id
    }

    /// The caller-defined type tag.
    #[must_use]
    pub fn node_type(&self) -> &'a str {
        &self.record.node_type
    }

    /// When the record was created.
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.record.created_at
    }

    /// The property value for `key`, if set.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&'a Value> {
        self.record.property(key)
    }

    /// The underlying record.
    #[must_use]
    pub fn record(&self) -> &'a Record {
        self.record
    }
}

/// Callbacks describing which watched records a commit inserted, updated, or
/// archived.
///
/// All methods are default no-ops — implement only the (kind, operation)
/// pairs of interest. For one notification, every insert callback fires
/// before any update callback, and every update callback before any archive
/// callback; a given record produces at most one callback per notification.
///
/// Callbacks run on the graph's notification dispatch context, which is not
/// the caller's context nor the commit context.
pub trait GraphDelegate: Send + Sync {
    /// A watched entity was inserted by a commit.
    fn did_insert_entity(&self, entity: EntityRef<'_>) {
        let _ = entity;
    }

    /// A watched entity was updated by a commit.
    fn did_update_entity(&self, entity: EntityRef<'_>) {
        let _ = entity;
    }

    /// A watched entity was archived by a commit.
    fn did_archive_entity(&self, entity: EntityRef<'_>) {
        let _ = entity;
    }

    /// A watched action was inserted by a commit.
    fn did_insert_action(&self, action: ActionRef<'_>) {
        let _ = action;
    }

    /// A watched action was updated by a commit.
    fn did_update_action(&self, action: ActionRef<'_>) {
        let _ = action;
    }

    /// A watched action was archived by a commit.
    fn did_archive_action(&self, action: ActionRef<'_>) {
        let _ = action;
    }

    /// A watched bond was inserted by a commit.
    fn did_insert_bond(&self, bond: BondRef<'_>) {
        let _ = bond;
    }

    /// A watched bond was updated by a commit.
    fn did_update_bond(&self, bond: BondRef<'_>) {
        let _ = bond;
    }

    /// A watched bond was archived by a commit.
    fn did_archive_bond(&self, bond: BondRef<'_>) {
        let _ = bond;
    }
}
