//! SQLite-backed document store.
//!
//! Documents live in a single table keyed by (collection, id) with the
//! body stored as JSON. Live queries are held in an in-process registry;
//! every committed mutation re-evaluates the affected queries and pushes
//! the full matching set to each subscriber.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error};
use rusqlite::{params, Connection};
use serde_json::Value;
use uuid::Uuid;

use super::errors::{StoreWriteError, SubscriptionError};
use super::{ChangeCallback, Document, DocumentStore, Fields, Subscription};

pub const SCHEMA_VERSION: i32 = 1;

const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    body TEXT NOT NULL,
    PRIMARY KEY (collection, id)
);

CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
"#;

struct Watcher {
    collection: String,
    field: String,
    value: Value,
    callback: ChangeCallback,
    /// Held while delivering; flipped off by unsubscribe. Guarantees no
    /// delivery can begin after unsubscribe returns.
    gate: Mutex<bool>,
}

struct Inner {
    conn: Mutex<Connection>,
    watchers: Mutex<HashMap<u64, Arc<Watcher>>>,
    next_watcher_id: AtomicU64,
}

pub struct SqliteStore {
    inner: Arc<Inner>,
}

/// A subscriber callback that panicked may leave a lock poisoned; the
/// guarded data is plain state that remains valid, so recover the guard.
fn relock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SqliteStore {
    /// Open the store at its default location, creating it if needed.
    pub fn open() -> Result<Self> {
        let path = Self::default_path()?;
        Self::open_at(path)
    }

    pub fn open_at(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory store for testing.
    pub fn open_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            inner: Arc::new(Inner {
                conn: Mutex::new(conn),
                watchers: Mutex::new(HashMap::new()),
                next_watcher_id: AtomicU64::new(1),
            }),
        };
        store.migrate()?;
        Ok(store)
    }

    fn default_path() -> Result<PathBuf> {
        let data_dir =
            dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join("notecmd").join("documents.db"))
    }

    fn migrate(&self) -> Result<()> {
        let version = self.schema_version()?;

        if version == 0 {
            let conn = relock(&self.inner.conn);
            conn.execute_batch(&format!("BEGIN TRANSACTION; {} COMMIT;", SCHEMA_V1))?;
            conn.execute(
                "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?)",
                [SCHEMA_VERSION],
            )?;
        }

        Ok(())
    }

    pub(crate) fn schema_version(&self) -> Result<i32> {
        let conn = relock(&self.inner.conn);
        let result: rusqlite::Result<i32> =
            conn.query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            });

        match result {
            Ok(v) => Ok(v),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(rusqlite::Error::SqliteFailure(err, msg)) => {
                // "no such table" reports as SQLITE_ERROR with an unknown code
                if err.code == rusqlite::ErrorCode::Unknown
                    && msg.as_ref().is_some_and(|m| m.contains("no such table"))
                {
                    Ok(0)
                } else {
                    Err(rusqlite::Error::SqliteFailure(err, msg).into())
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Run the live query of one watcher and return the current set.
    fn matching_documents(&self, watcher: &Watcher) -> Result<Vec<Document>, SubscriptionError> {
        let conn = relock(&self.inner.conn);
        let mut stmt = conn
            .prepare("SELECT id, body FROM documents WHERE collection = ? ORDER BY id")
            .map_err(SubscriptionError::Query)?;

        let rows = stmt
            .query_map([&watcher.collection], |row| {
                let id: String = row.get(0)?;
                let body: String = row.get(1)?;
                Ok((id, body))
            })
            .map_err(SubscriptionError::Query)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(SubscriptionError::Query)?;

        let mut documents = Vec::with_capacity(rows.len());
        for (id, body) in rows {
            let fields: Value =
                serde_json::from_str(&body).map_err(|_| SubscriptionError::MalformedDocument)?;
            let Value::Object(fields) = fields else {
                return Err(SubscriptionError::MalformedDocument);
            };
            if fields.get(&watcher.field) == Some(&watcher.value) {
                documents.push(Document { id, fields });
            }
        }

        Ok(documents)
    }

    /// Push the current result set to every watcher of `collection`.
    fn notify(&self, collection: &str) {
        let watchers: Vec<Arc<Watcher>> = relock(&self.inner.watchers)
            .values()
            .filter(|w| w.collection == collection)
            .cloned()
            .collect();

        for watcher in watchers {
            self.deliver(&watcher);
        }
    }

    fn deliver(&self, watcher: &Watcher) {
        let snapshot = match self.matching_documents(watcher) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                // Reported, not surfaced: the subscription goes quiet on
                // persistent failure and there is no automatic retry.
                error!("subscription dropped a change: {e}");
                return;
            }
        };

        let active = relock(&watcher.gate);
        if *active {
            (watcher.callback)(snapshot);
        }
    }

    fn read_body(conn: &Connection, collection: &str, id: &str) -> rusqlite::Result<Option<String>> {
        let result = conn.query_row(
            "SELECT body FROM documents WHERE collection = ? AND id = ?",
            params![collection, id],
            |row| row.get(0),
        );
        match result {
            Ok(body) => Ok(Some(body)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreWriteError> {
        let id = Uuid::new_v4().to_string();
        let body = serde_json::to_string(&Value::Object(fields))?;

        {
            let conn = relock(&self.inner.conn);
            conn.execute(
                "INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)",
                params![collection, id, body],
            )?;
        }

        self.notify(collection);
        Ok(id)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<(), StoreWriteError> {
        {
            let conn = relock(&self.inner.conn);

            let body = Self::read_body(&conn, collection, id)?
                .ok_or_else(|| StoreWriteError::MissingDocument(id.to_string()))?;

            let mut merged: Value = serde_json::from_str(&body)?;
            let Value::Object(existing) = &mut merged else {
                return Err(StoreWriteError::Transport(format!(
                    "document {id} has a non-object body"
                )));
            };
            for (key, value) in fields {
                existing.insert(key, value);
            }

            conn.execute(
                "UPDATE documents SET body = ? WHERE collection = ? AND id = ?",
                params![serde_json::to_string(&merged)?, collection, id],
            )?;
        }

        self.notify(collection);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreWriteError> {
        let removed = {
            let conn = relock(&self.inner.conn);
            conn.execute(
                "DELETE FROM documents WHERE collection = ? AND id = ?",
                params![collection, id],
            )?
        };

        if removed > 0 {
            self.notify(collection);
        }
        Ok(())
    }

    fn subscribe(
        &self,
        collection: &str,
        field: &str,
        value: Value,
        on_change: ChangeCallback,
    ) -> Subscription {
        let watcher = Arc::new(Watcher {
            collection: collection.to_string(),
            field: field.to_string(),
            value,
            callback: on_change,
            gate: Mutex::new(true),
        });

        let id = self.inner.next_watcher_id.fetch_add(1, Ordering::Relaxed);
        relock(&self.inner.watchers).insert(id, Arc::clone(&watcher));
        debug!("live query {id} attached to {collection}");

        // Initial load counts as a change.
        self.deliver(&watcher);

        let inner = Arc::clone(&self.inner);
        Subscription::new(move || {
            let removed = relock(&inner.watchers).remove(&id);
            if let Some(watcher) = removed {
                // Wait out any in-flight delivery, then close the gate.
                let mut active = relock(&watcher.gate);
                *active = false;
                debug!("live query {id} detached");
            }
        })
    }
}
