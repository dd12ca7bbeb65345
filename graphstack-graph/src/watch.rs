//! The watch registry and master filter construction.

use graphstack_types::{Filter, NodeKind};
use std::collections::BTreeSet;

/// A registered interest: records of `kind` whose `field` equals `value`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct WatchEntry {
    kind: NodeKind,
    field: String,
    value: String,
}

/// Tracks the set of registered watches and compiles them into the master
/// filter.
///
/// Entries are kept in a sorted set so the compiled filter is deterministic
/// for a given set of watches — registering the same watches in any order,
/// any number of times, yields the same master filter.
#[derive(Debug, Default)]
pub(crate) struct WatchRegistry {
    entries: BTreeSet<WatchEntry>,
}

impl WatchRegistry {
    /// Registers a watch. Returns true when the entry was already present
    /// (registration is idempotent and the master filter is unchanged).
    pub fn register(&mut self, kind: NodeKind, field: &str, value: &str) -> bool {
        !self.entries.insert(WatchEntry {
            kind,
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    /// Compiles the registered watches into the master filter: the `Or` of
    /// `And(Kind, Eq(field, value))` per entry. Empty when no watches are
    /// registered — and an empty filter matches nothing.
    pub fn master_filter(&self) -> Filter {
        Filter::or(self.entries.iter().map(|entry| {
            Filter::and([
                Filter::kind(entry.kind),
                Filter::eq(entry.field.clone(), entry.value.clone()),
            ])
        }))
    }

    /// Number of registered watches.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_reports_duplicates() {
        let mut registry = WatchRegistry::default();
        assert!(!registry.register(NodeKind::Entity, "type", "user"));
        assert!(registry.register(NodeKind::Entity, "type", "user"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn same_value_different_kind_is_distinct() {
        let mut registry = WatchRegistry::default();
        assert!(!registry.register(NodeKind::Entity, "type", "user"));
        assert!(!registry.register(NodeKind::Action, "type", "user"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn master_filter_is_order_independent() {
        let mut a = WatchRegistry::default();
        a.register(NodeKind::Entity, "type", "user");
        a.register(NodeKind::Bond, "type", "follows");

        let mut b = WatchRegistry::default();
        b.register(NodeKind::Bond, "type", "follows");
        b.register(NodeKind::Entity, "type", "user");

        assert_eq!(a.master_filter(), b.master_filter());
    }

    #[test]
    fn empty_registry_compiles_to_empty_filter() {
        let registry = WatchRegistry::default();
        assert!(registry.master_filter().matches_nothing());
    }
}
