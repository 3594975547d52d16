//! Durable storage for the state tree.
//!
//! # Responsibility
//! - Open and migrate the SQLite store backing the single durable key.
//! - Serialize the full state tree on save and rehydrate it with the
//!   defaulting merge on load.
//!
//! # Invariants
//! - Saves observe only fully-applied state (the store persists after the
//!   whole dispatch batch).
//! - Load failures degrade to "no saved state", logged, never thrown to
//!   callers.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod db;
pub mod migrations;
mod snapshot;

pub use db::{open_db, open_db_in_memory};
pub use snapshot::{load_state, save_state, SqliteStatePersister, STATE_KEY};

use crate::store::AppState;

pub type PersistResult<T> = Result<T, PersistError>;

#[derive(Debug)]
pub enum PersistError {
    Sqlite(rusqlite::Error),
    Serialize(serde_json::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "state serialization failed: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Seam between the store and durable storage. The store saves through
/// this after every dispatch batch.
pub trait StatePersister {
    fn persist(&self, state: &AppState) -> PersistResult<()>;
}
