//! Classification of committed change sets into delegate callbacks.

use crate::delegate::{ActionRef, BondRef, EntityRef, GraphDelegate};
use graphstack_types::{ChangeSet, Filter, NodeKind, Record};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
enum Operation {
    Insert,
    Update,
    Archive,
}

/// Filters one committed change set through the master filter and dispatches
/// a delegate callback per surviving record.
///
/// Inserts are dispatched before updates, updates before archives. Within a
/// set the records are unordered and dispatch order carries no meaning.
pub(crate) fn dispatch(changes: &ChangeSet, filter: &Filter, delegate: &dyn GraphDelegate) {
    let mut dispatched = 0;
    dispatched += dispatch_set(&changes.inserted, Operation::Insert, filter, delegate);
    dispatched += dispatch_set(&changes.updated, Operation::Update, filter, delegate);
    dispatched += dispatch_set(&changes.archived, Operation::Archive, filter, delegate);
    debug!(
        "dispatched {} of {} changed records to delegate",
        dispatched,
        changes.len()
    );
}

fn dispatch_set(
    records: &[Record],
    operation: Operation,
    filter: &Filter,
    delegate: &dyn GraphDelegate,
) -> usize {
    let mut dispatched = 0;
    for record in records {
        // Filtering precedes classification: non-watched records never
        // reach the delegate.
        if !filter.matches(record) {
            continue;
        }
        dispatched += 1;
        match (record.kind, operation) {
            (NodeKind::Entity, Operation::Insert) => {
                delegate.did_insert_entity(EntityRef::new(record));
            }
            (NodeKind::Entity, Operation::Update) => {
                delegate.did_update_entity(EntityRef::new(record));
            }
            (NodeKind::Entity, Operation::Archive) => {
                delegate.did_archive_entity(EntityRef::new(record));
            }
            (NodeKind::Action, Operation::Insert) => {
                delegate.did_insert_action(ActionRef::new(record));
            }
            (NodeKind::Action, Operation::Update) => {
                delegate.did_update_action(ActionRef::new(record));
            }
            (NodeKind::Action, Operation::Archive) => {
                delegate.did_archive_action(ActionRef::new(record));
            }
            (NodeKind::Bond, Operation::Insert) => {
                delegate.did_insert_bond(BondRef::new(record));
            }
            (NodeKind::Bond, Operation::Update) => {
                delegate.did_update_bond(BondRef::new(record));
            }
            (NodeKind::Bond, Operation::Archive) => {
                delegate.did_archive_bond(BondRef::new(record));
            }
        }
    }
    dispatched
}
