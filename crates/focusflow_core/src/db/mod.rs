//! SQLite file behind [`crate::store::SqliteStore`].
//!
//! # Responsibility
//! - Open the `kv_store` database and bring its schema up to date.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A connection is handed out only after every migration committed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// The database file (or in-memory database) could not be opened.
    Connect {
        target: String,
        source: rusqlite::Error,
    },
    /// Migration `version` failed; the transaction was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build and is left untouched.
    SchemaTooNew { found: u32, supported: u32 },
    /// Any other statement the store issued.
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connect { target, source } => {
                write!(f, "cannot open key-value store at {target}: {source}")
            }
            Self::Migration { version, source } => {
                write!(f, "key-value store migration {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "key-value store schema v{found} is newer than this build supports (v{supported})"
            ),
            Self::Sqlite(err) => write!(f, "key-value store statement failed: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connect { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
