//! Embedded SQLite record store, the local-storage backend.

use crate::store::{Collection, RecordStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS records (
    collection TEXT NOT NULL,
    key        TEXT NOT NULL,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (collection, key)
);
CREATE TABLE IF NOT EXISTS state (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// Single-file SQLite store holding the three record collections plus
/// the serialized-text snapshot slots used by `save_state`.
///
/// The connection is shared behind a mutex, so clones of a `LocalStore`
/// address the same database.
pub struct LocalStore {
    conn: Arc<Mutex<Connection>>,
}

impl LocalStore {
    /// Opens or creates a store at the given path.
    ///
    /// Creates parent directories if they don't exist. Initializes the
    /// schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the parent directory cannot be
    /// created, or `StoreError::Database` if the database cannot be
    /// opened.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        debug!(path = %path.display(), "opened local record store");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens an in-memory store, useful for tests and ephemeral
    /// sessions.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Reads a serialized-text snapshot slot, or `None` when the slot
    /// was never written.
    pub fn get_state(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.conn.lock();
        let value = conn
            .query_row("SELECT value FROM state WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Writes a serialized-text snapshot slot, overwriting any previous
    /// value.
    pub fn put_state(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR REPLACE INTO state (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl Clone for LocalStore {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[async_trait]
impl RecordStore for LocalStore {
    async fn get(&self, collection: Collection, key: &str) -> StoreResult<Option<Value>> {
        let conn = self.conn.lock();
        let text: Option<String> = conn
            .query_row(
                "SELECT value FROM records WHERE collection = ?1 AND key = ?2",
                params![collection.key(), key],
                |row| row.get(0),
            )
            .optional()?;
        match text {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, collection: Collection, key: &str, value: Value) -> StoreResult<()> {
        let text = serde_json::to_string(&value)?;
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR REPLACE INTO records (collection, key, value, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![collection.key(), key, text, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    async fn fetch(&self, collection: Collection) -> StoreResult<Option<Value>> {
        let conn = self.conn.lock();
        // Key order; note records use ULID keys, so this is creation order.
        let mut stmt =
            conn.prepare("SELECT value FROM records WHERE collection = ?1 ORDER BY key")?;
        let rows = stmt.query_map([collection.key()], |row| row.get::<_, String>(0))?;

        let mut items = Vec::new();
        for row in rows {
            let text = row?;
            items.push(serde_json::from_str(&text)?);
        }

        if items.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Value::Array(items)))
        }
    }
}
