use super::{DurableStore, StoreError, StoreResult};
use crate::db::{open_db, open_db_in_memory, DbResult};
use async_trait::async_trait;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// SQLite-backed store; every key is one row of `kv_store`.
///
/// Statements run on Tokio's blocking pool so callers on the async runtime
/// never block on disk I/O.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) the store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    async fn with_conn<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let joined = tokio::task::spawn_blocking(move || {
            let guard = conn.lock().unwrap_or_else(PoisonError::into_inner);
            op(&guard)
        })
        .await
        .map_err(|err| StoreError::Unavailable(format!("sqlite worker failed: {err}")))?;
        Ok(joined?)
    }
}

#[async_trait]
impl DurableStore for SqliteStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let owned_key = key.to_owned();
        let value = self
            .with_conn(move |conn| {
                conn.query_row(
                    "SELECT value FROM kv_store WHERE key = ?1;",
                    [owned_key],
                    |row| row.get::<_, String>(0),
                )
                .optional()
            })
            .await?;
        debug!(
            "event=store_get module=store key={key} found={} bytes={}",
            value.is_some(),
            value.as_ref().map_or(0, String::len)
        );
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let bytes = value.len();
        let owned_key = key.to_owned();
        let owned_value = value.to_owned();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%s', 'now') * 1000)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at;",
                params![owned_key, owned_value],
            )
            .map(|_| ())
        })
        .await?;
        debug!("event=store_set module=store key={key} bytes={bytes}");
        Ok(())
    }
}
