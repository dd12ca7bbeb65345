//! Row storage over a SQLite connection.
//!
//! `NodeStore` is the synchronous half of the engine: it owns the connection
//! and knows the row layout. It is only ever driven from the engine thread,
//! so it needs no internal locking.

use crate::{StorageError, StorageResult};
use graphstack_types::{ChangeSet, Filter, NodeKind, Record, RecordId, Timestamp};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

const SCHEMA_VERSION: i32 = 1;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS nodes (
    id          TEXT PRIMARY KEY,
    kind        TEXT NOT NULL,
    node_type   TEXT NOT NULL,
    created_at  INTEGER NOT NULL,
    properties  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_nodes_kind_type ON nodes (kind, node_type);
";

pub(crate) struct NodeStore {
    conn: Connection,
}

impl NodeStore {
    /// Opens (creating if necessary) a store at the given file path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        debug!("opened node store at {}", path.display());
        Self::init(conn)
    }

    /// Opens a transient in-memory store, used by tests.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StorageResult<Self> {
        let version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        match version {
            0 => {
                conn.execute_batch(SCHEMA)?;
                conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            }
            SCHEMA_VERSION => {}
            found => return Err(StorageError::SchemaVersion { found }),
        }
        Ok(Self { conn })
    }

    /// Applies a change set as one transaction: inserts, then updates, then
    /// archive deletions. Either every mutation lands or none do.
    pub fn apply(&mut self, changes: &ChangeSet) -> StorageResult<()> {
        let tx = self.conn.transaction()?;

        for record in &changes.inserted {
            tx.execute(
                "INSERT INTO nodes (id, kind, node_type, created_at, properties)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id.to_string(),
                    record.kind.as_str(),
                    record.node_type,
                    record.created_at.as_millis(),
                    serde_json::to_string(&record.properties)?,
                ],
            )?;
        }

        for record in &changes.updated {
            tx.execute(
                "UPDATE nodes SET node_type = ?2, properties = ?3 WHERE id = ?1",
                params![
                    record.id.to_string(),
                    record.node_type,
                    serde_json::to_string(&record.properties)?,
                ],
            )?;
        }

        for record in &changes.archived {
            tx.execute(
                "DELETE FROM nodes WHERE id = ?1",
                params![record.id.to_string()],
            )?;
        }

        tx.commit()?;
        debug!(
            "committed change set: {} inserted, {} updated, {} archived",
            changes.inserted.len(),
            changes.updated.len(),
            changes.archived.len()
        );
        Ok(())
    }

    /// Returns every record matching the filter.
    pub fn query(&self, filter: &Filter) -> StorageResult<Vec<Record>> {
        if filter.matches_nothing() {
            return Ok(Vec::new());
        }

        let mut stmt = self
            .conn
            .prepare("SELECT id, kind, node_type, created_at, properties FROM nodes")?;
        let rows = stmt.query_map([], row_to_raw)?;

        let mut records = Vec::new();
        for row in rows {
            let record = decode(row?)?;
            if filter.matches(&record) {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Looks a record up by identity.
    pub fn find(&self, id: &RecordId) -> StorageResult<Option<Record>> {
        let raw = self
            .conn
            .query_row(
                "SELECT id, kind, node_type, created_at, properties FROM nodes WHERE id = ?1",
                params![id.to_string()],
                row_to_raw,
            )
            .optional()?;
        raw.map(decode).transpose()
    }
}

/// Raw column values as read from a row, before type-level decoding.
type RawRow = (String, String, String, i64, String);

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn decode((id, kind, node_type, created_at, properties): RawRow) -> StorageResult<Record> {
    let kind: NodeKind = kind
        .parse()
        .map_err(|_| StorageError::UnknownKind(kind.clone()))?;
    Ok(Record {
        id: RecordId::parse(&id)?,
        kind,
        node_type,
        created_at: Timestamp::from_millis(created_at),
        properties: serde_json::from_str(&properties)?,
    })
}
