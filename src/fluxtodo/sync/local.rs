use super::SyncAdapter;
use crate::error::{Result, TodoError};
use crate::model::{TodoId, TodoRecord};
use crate::storage::KeyValueStorage;
use indexmap::IndexMap;

/// Sync adapter persisting to one named slot of a [`KeyValueStorage`].
///
/// The slot holds a JSON object mapping each id to its record:
///
/// ```text
/// {"7c9e…": {"id": "7c9e…", "text": "buy milk", "complete": false}, …}
/// ```
///
/// The slot is read once, in [`LocalStorageAdapter::new`]. After that the
/// cached mapping is authoritative and the whole slot is rewritten on every
/// create, update and destroy. A failed write leaves the cache as it was, so
/// the cache always matches the last successful write.
pub struct LocalStorageAdapter<S: KeyValueStorage> {
    name: String,
    storage: S,
    data: IndexMap<TodoId, TodoRecord>,
}

impl<S: KeyValueStorage> LocalStorageAdapter<S> {
    pub fn new(name: impl Into<String>, storage: S) -> Result<Self> {
        let name = name.into();
        let mut data: IndexMap<TodoId, TodoRecord> = match storage.get_item(&name)? {
            Some(json) if !json.trim().is_empty() => {
                serde_json::from_str(&json).map_err(TodoError::Serialization)?
            }
            _ => IndexMap::new(),
        };
        // The slot key is the record's identity, whatever the body says.
        for (key, record) in data.iter_mut() {
            record.id = Some(key.clone());
        }
        tracing::debug!(slot = %name, records = data.len(), "loaded sync slot");
        Ok(Self {
            name,
            storage,
            data,
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn save_data(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.data).map_err(TodoError::Serialization)?;
        self.storage.set_item(&self.name, &json)
    }
}

impl<S: KeyValueStorage> SyncAdapter for LocalStorageAdapter<S> {
    fn create(&mut self, record: &mut TodoRecord) -> Result<TodoRecord> {
        if record.id.is_none() {
            record.id = Some(TodoId::generate());
        }
        self.update(record)
    }

    fn update(&mut self, record: &TodoRecord) -> Result<TodoRecord> {
        let id = record.id.clone().ok_or(TodoError::MissingId)?;
        let previous = self.data.insert(id.clone(), record.clone());
        if let Err(e) = self.save_data() {
            match previous {
                Some(previous) => {
                    self.data.insert(id, previous);
                }
                None => {
                    self.data.shift_remove(&id);
                }
            }
            return Err(e);
        }
        Ok(record.clone())
    }

    fn find(&self, id: &TodoId) -> Result<TodoRecord> {
        self.data
            .get(id)
            .cloned()
            .ok_or_else(|| TodoError::NotFound(id.clone()))
    }

    fn find_all(&self) -> Result<Vec<TodoRecord>> {
        Ok(self.data.values().cloned().collect())
    }

    fn destroy(&mut self, id: &TodoId) -> Result<TodoRecord> {
        let (index, key, removed) = self
            .data
            .shift_remove_full(id)
            .ok_or_else(|| TodoError::NotFound(id.clone()))?;
        if let Err(e) = self.save_data() {
            self.data.shift_insert(index, key, removed);
            return Err(e);
        }
        Ok(removed)
    }
}
