//! Structured filter expressions over records.
//!
//! Filters are built and merged in code as an expression tree — there is no
//! string predicate syntax to parse, and so no runtime parse failures. The
//! watch layer compiles its registered interests into one merged `Or` of
//! per-watch `And` clauses and evaluates it directly against records.

use crate::{NodeKind, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A boolean expression over records.
///
/// Evaluation rules:
/// - `Kind(k)` matches records whose kind discriminator is `k`.
/// - `Eq("type", v)` matches against the record's type tag; any other key
///   matches against the property bag.
/// - `And([])` matches every record; `Or([])` matches none. An empty master
///   filter is therefore `Or([])` — no watches, no matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    Kind(NodeKind),
    Eq(String, Value),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    /// An equality test on a field. The key `"type"` addresses the record's
    /// type tag; every other key addresses the property bag.
    #[must_use]
    pub fn eq(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(key.into(), value.into())
    }

    /// A kind test on the record's discriminator.
    #[must_use]
    pub const fn kind(kind: NodeKind) -> Self {
        Filter::Kind(kind)
    }

    /// The conjunction of the given filters. Empty input matches everything.
    #[must_use]
    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::And(filters.into_iter().collect())
    }

    /// The disjunction of the given filters. Empty input matches nothing.
    #[must_use]
    pub fn or(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Or(filters.into_iter().collect())
    }

    /// The filter that matches no record at all.
    #[must_use]
    pub fn nothing() -> Self {
        Filter::Or(Vec::new())
    }

    /// Returns true if this filter can never match any record.
    ///
    /// This is a syntactic check (an empty `Or`), not a full satisfiability
    /// test; it exists so callers can recognize the empty master filter.
    #[must_use]
    pub fn matches_nothing(&self) -> bool {
        matches!(self, Filter::Or(branches) if branches.is_empty())
    }

    /// Evaluates the filter against a record.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Filter::Kind(kind) => record.kind == *kind,
            Filter::Eq(key, value) => match key.as_str() {
                "type" => value
                    .as_str()
                    .is_some_and(|expected| record.node_type == expected),
                _ => record.property(key) == Some(value),
            },
            Filter::And(clauses) => clauses.iter().all(|f| f.matches(record)),
            Filter::Or(branches) => branches.iter().any(|f| f.matches(record)),
        }
    }
}
