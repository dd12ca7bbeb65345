//! Change sets — the unit of commit and of change notification.

use crate::Record;
use serde::{Deserialize, Serialize};

/// A committed (or to-be-committed) transaction's effect, expressed as three
/// unordered record sets.
///
/// The same shape serves both directions of the engine boundary: the graph
/// layer hands the engine a change set to commit, and the engine broadcasts
/// the change set it committed to subscribers. Within each set there is no
/// defined order — consumers must not depend on one.
///
/// "Archived" is the terminal removal state for a record; an archived record
/// in a notification carries the last state it had in the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub inserted: Vec<Record>,
    pub updated: Vec<Record>,
    pub archived: Vec<Record>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no records are present in any set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.updated.is_empty() && self.archived.is_empty()
    }

    /// Total number of records across the three sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inserted.len() + self.updated.len() + self.archived.len()
    }
}
