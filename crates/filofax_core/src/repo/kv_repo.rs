//! Key-value backend contract plus memory and SQLite implementations.
//!
//! # Responsibility
//! - Expose `get(key) -> Option<String>` and `set(key, value)`.
//! - Map backend failures into `PersistenceError`.
//!
//! # Invariants
//! - A successful `set` is visible to the next `get` on the same backend.
//! - SQLite writes are single-statement upserts.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Backend read or write failure.
///
/// Recoverable from the session's point of view: in-memory state stays
/// authoritative and the next mutation writes the whole collection again.
#[derive(Debug)]
pub enum PersistenceError {
    /// SQLite transport or schema failure.
    Db(DbError),
    /// Contact collection could not be serialized.
    Encode(serde_json::Error),
    /// Backend-specific rejection, e.g. quota exceeded.
    Backend(String),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "contacts storage failed: {err}"),
            Self::Encode(err) => write!(f, "contacts could not be encoded: {err}"),
            Self::Backend(message) => write!(f, "contacts storage rejected write: {message}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for PersistenceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// String blob store keyed by string.
pub trait KvBackend {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> PersistenceResult<Option<String>>;
    /// Overwrites the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()>;
}

impl<B: KvBackend + ?Sized> KvBackend for &mut B {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        (**self).set(key, value)
    }
}

/// Process-local backend. Contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvBackend {
    entries: HashMap<String, String>,
}

impl MemoryKvBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }
}

impl KvBackend for MemoryKvBackend {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable backend over the `kv_entries` table.
pub struct SqliteKvBackend {
    conn: Connection,
}

impl SqliteKvBackend {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `Backend` when the connection has no `kv_entries` table.
    pub fn try_new(conn: Connection) -> PersistenceResult<Self> {
        ensure_kv_table(&conn)?;
        Ok(Self { conn })
    }

    /// Opens (or creates) a database file and wraps it.
    pub fn open(path: impl AsRef<Path>) -> PersistenceResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a throwaway in-memory database.
    pub fn open_in_memory() -> PersistenceResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Deletes `key`, returning whether a row was removed.
    pub fn remove(&mut self, key: &str) -> PersistenceResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

impl KvBackend for SqliteKvBackend {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn ensure_kv_table(conn: &Connection) -> PersistenceResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'kv_entries'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists == 1 {
        Ok(())
    } else {
        Err(PersistenceError::Backend(
            "missing required table `kv_entries`".to_string(),
        ))
    }
}
