use super::KeyValueStorage;
use crate::error::{Result, TodoError};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Default)]
struct MemoryInner {
    items: BTreeMap<String, String>,
    simulate_write_error: bool,
    writes: usize,
}

/// In-memory key-value storage. Does NOT persist data.
///
/// Clones share the same map, the way every adapter in a page shares one
/// `localStorage`. Uses `RefCell` since the app is single-threaded.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set_item`/`remove_item` fail.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.inner.borrow_mut().simulate_write_error = simulate;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.inner.borrow().writes
    }

    fn check_writable(&self) -> Result<()> {
        if self.inner.borrow().simulate_write_error {
            return Err(TodoError::Storage("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.borrow().items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        let mut inner = self.inner.borrow_mut();
        inner.items.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.check_writable()?;
        let mut inner = self.inner.borrow_mut();
        inner.items.remove(key);
        inner.writes += 1;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.inner.borrow().items.keys().cloned().collect())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{TodoId, TodoRecord};
    use indexmap::IndexMap;

    /// Builds a `MemoryStorage` whose slot already holds some todos.
    pub struct StorageFixture {
        pub storage: MemoryStorage,
        slot: String,
        records: IndexMap<TodoId, TodoRecord>,
    }

    impl StorageFixture {
        pub fn new(slot: &str) -> Self {
            Self {
                storage: MemoryStorage::new(),
                slot: slot.to_string(),
                records: IndexMap::new(),
            }
        }

        pub fn with_todo(mut self, id: &str, text: &str, complete: bool) -> Self {
            let id = TodoId::from(id);
            self.records.insert(
                id.clone(),
                TodoRecord {
                    id: Some(id),
                    text: text.to_string(),
                    complete,
                },
            );
            self
        }

        pub fn build(mut self) -> MemoryStorage {
            let json = serde_json::to_string(&self.records).unwrap();
            self.storage.set_item(&self.slot, &json).unwrap();
            self.storage
        }
    }
}
