//! Durable key-value store boundary.
//!
//! # Responsibility
//! - Define the async get/set contract the repositories persist through.
//! - Provide the SQLite-backed adapter and an in-process adapter.
//!
//! # Invariants
//! - Values are opaque text blobs; the store never inspects them.
//! - No atomicity is promised across different keys.

use crate::db::DbError;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Shared handle used by every repository of one application instance.
pub type SharedStore = Arc<dyn DurableStore>;

/// Failure reading or writing a key.
#[derive(Debug)]
pub enum StoreError {
    /// The SQLite backend rejected the statement.
    Db(DbError),
    /// The backend could not be reached (worker gone, device unavailable, ...).
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Async key-value persistence contract.
///
/// Both operations may suspend and may fail; callers decide how to recover.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Returns the blob stored under `key`, or `None` when the key was never set.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the blob stored under `key`.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}
