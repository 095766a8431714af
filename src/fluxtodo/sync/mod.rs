//! # Sync Layer
//!
//! The store never touches storage directly; it persists through a
//! [`SyncAdapter`]. The adapter contract is the classic four-method CRUD set a
//! REST-backed adapter would also implement, so the local adapter here can be
//! swapped for a remote one without changing the store.
//!
//! ## Implementations
//!
//! - [`local::LocalStorageAdapter`]: keeps all records of one named slot in
//!   memory, loaded eagerly at construction, and rewrites the whole slot on
//!   every mutation. Every call completes synchronously.

use crate::error::Result;
use crate::model::{TodoId, TodoRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod local;

pub use local::LocalStorageAdapter;

/// The kind of persistence round trip, reported in sync/error events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMethod {
    Read,
    Create,
    Update,
    Delete,
}

impl fmt::Display for SyncMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncMethod::Read => "read",
            SyncMethod::Create => "create",
            SyncMethod::Update => "update",
            SyncMethod::Delete => "delete",
        };
        f.write_str(name)
    }
}

pub trait SyncAdapter {
    /// Persist a new record. Assigns `record.id` if it has none.
    /// Returns the stored representation.
    fn create(&mut self, record: &mut TodoRecord) -> Result<TodoRecord>;

    /// Overwrite the record stored under `record.id`.
    fn update(&mut self, record: &TodoRecord) -> Result<TodoRecord>;

    /// Look up a single record.
    fn find(&self, id: &TodoId) -> Result<TodoRecord>;

    /// Every stored record, in insertion order.
    fn find_all(&self) -> Result<Vec<TodoRecord>>;

    /// Remove a record, returning what was stored.
    fn destroy(&mut self, id: &TodoId) -> Result<TodoRecord>;
}
