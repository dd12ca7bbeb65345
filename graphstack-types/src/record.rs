//! Records and the closed set of node kinds.

use crate::{Error, RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The kind of a record — the closed set of node shapes in the graph.
///
/// - `Entity`: an attributed node
/// - `Action`: an event/verb node
/// - `Bond`: a typed edge between nodes
///
/// The set is closed on purpose: classification matches on it exhaustively,
/// so a new kind cannot be added without the compiler pointing at every
/// dispatch site.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Entity,
    Action,
    Bond,
}

impl NodeKind {
    /// The string form used in the persisted row layout.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Entity => "entity",
            NodeKind::Action => "action",
            NodeKind::Bond => "bond",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entity" => Ok(NodeKind::Entity),
            "action" => Ok(NodeKind::Action),
            "bond" => Ok(NodeKind::Bond),
            other => Err(Error::UnknownKind(other.to_string())),
        }
    }
}

/// A single record in the graph store.
///
/// Every record carries its kind discriminator, a caller-defined type tag
/// (e.g. "user", "clicked"), a creation timestamp, and an opaque bag of
/// JSON properties. The structure of the property bag is entirely
/// caller-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub kind: NodeKind,
    pub node_type: String,
    pub created_at: Timestamp,
    pub properties: Map<String, Value>,
}

impl Record {
    /// Creates a new record of the given kind and type with no properties.
    #[must_use]
    pub fn new(kind: NodeKind, node_type: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            kind,
            node_type: node_type.into(),
            created_at: Timestamp::now(),
            properties: Map::new(),
        }
    }

    /// Creates a new entity record.
    #[must_use]
    pub fn entity(node_type: impl Into<String>) -> Self {
        Self::new(NodeKind::Entity, node_type)
    }

    /// Creates a new action record.
    #[must_use]
    pub fn action(node_type: impl Into<String>) -> Self {
        Self::new(NodeKind::Action, node_type)
    }

    /// Creates a new bond record.
    #[must_use]
    pub fn bond(node_type: impl Into<String>) -> Self {
        Self::new(NodeKind::Bond, node_type)
    }

    /// Returns the property value for `key`, if set.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Sets a property, replacing any previous value for `key`.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Removes a property, returning the previous value if one was set.
    pub fn remove_property(&mut self, key: &str) -> Option<Value> {
        self.properties.remove(key)
    }

    /// Builder-style property setter for constructing records inline.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(key, value);
        self
    }
}
