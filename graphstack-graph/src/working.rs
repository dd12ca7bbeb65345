//! The in-memory working set of pending record mutations.

use graphstack_types::{ChangeSet, Record, RecordId};
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Pending {
    Insert(Record),
    Update(Record),
    Archive(Record),
}

/// Pending mutations staged against the store, keyed by record identity.
///
/// At most one pending mutation per record; staging a second mutation for
/// the same id replaces the first, with two exceptions that keep the commit
/// classification honest:
/// - updating a staged insert folds the new state into the insert (the
///   record has never been committed, so it is still an insert)
/// - archiving a staged insert removes the record from the working set
///   entirely (it never reaches the store and produces no callbacks)
#[derive(Debug, Default)]
pub(crate) struct WorkingSet {
    pending: HashMap<RecordId, Pending>,
}

impl WorkingSet {
    /// Returns true when nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Stages a record for insertion.
    pub fn insert(&mut self, record: Record) {
        self.pending.insert(record.id, Pending::Insert(record));
    }

    /// Stages new state for an existing record.
    pub fn update(&mut self, record: Record) {
        match self.pending.get_mut(&record.id) {
            Some(Pending::Insert(staged)) => *staged = record,
            _ => {
                self.pending.insert(record.id, Pending::Update(record));
            }
        }
    }

    /// Stages a record for archival.
    pub fn archive(&mut self, record: Record) {
        match self.pending.get(&record.id) {
            Some(Pending::Insert(_)) => {
                self.pending.remove(&record.id);
            }
            _ => {
                self.pending.insert(record.id, Pending::Archive(record));
            }
        }
    }

    /// Snapshots the staged mutations as a change set without draining them.
    pub fn to_change_set(&self) -> ChangeSet {
        let mut changes = ChangeSet::new();
        for pending in self.pending.values() {
            match pending {
                Pending::Insert(record) => changes.inserted.push(record.clone()),
                Pending::Update(record) => changes.updated.push(record.clone()),
                Pending::Archive(record) => changes.archived.push(record.clone()),
            }
        }
        changes
    }

    /// Drops everything staged.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
