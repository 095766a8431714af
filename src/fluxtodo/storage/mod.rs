//! # Key-Value Storage
//!
//! The raw string store the sync adapter persists into, modelled on browser
//! `localStorage`: named items holding string values.
//!
//! This trait handles the "how" of storage (filesystem vs memory), while
//! [`crate::sync::LocalStorageAdapter`] handles the "what" (the id → record
//! mapping kept in one named slot).
//!
//! ## Implementations
//!
//! - [`fs::FileStorage`]: one file per key under a root directory
//! - [`memory::MemoryStorage`]: shared in-memory map, for tests and for
//!   running the app without persistence

use crate::error::Result;

pub mod fs;
pub mod memory;

pub trait KeyValueStorage {
    /// Read the value stored under `key`. `Ok(None)` if the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;

    /// All keys currently stored, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}
