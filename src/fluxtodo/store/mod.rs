//! # Todo Store
//!
//! An ordered collection of [`TodoItem`]s that turns dispatched
//! [`TodoAction`]s into collection mutations and persists each mutation
//! through a [`SyncAdapter`].
//!
//! The store itself knows nothing about listeners: every mutating method
//! returns the [`StoreEvent`]s it produced, and the owner (see
//! [`crate::app::TodoApp`]) delivers them once the store is no longer
//! borrowed.
//!
//! ## Persistence failures
//!
//! A failed round trip never undoes the in-memory mutation. It is logged and
//! reported as [`StoreEvent::Error`]; the collection and the slot may then
//! disagree until the next successful write of that item.

use crate::actions::TodoAction;
use crate::error::TodoError;
use crate::events::StoreEvent;
use crate::model::{ClientId, TodoItem, TodoRecord};
use crate::sync::{SyncAdapter, SyncMethod};

pub struct TodoStore<A: SyncAdapter> {
    items: Vec<TodoItem>,
    adapter: A,
    next_cid: u64,
}

impl<A: SyncAdapter> TodoStore<A> {
    /// An empty store. Call [`TodoStore::fetch`] to load persisted items.
    pub fn new(adapter: A) -> Self {
        Self {
            items: Vec::new(),
            adapter,
            next_cid: 1,
        }
    }

    /// Build a store and load it from `adapter` in one step.
    pub fn load(adapter: A) -> (Self, Vec<StoreEvent>) {
        let mut store = Self::new(adapter);
        let events = store.fetch();
        (store, events)
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, cid: ClientId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.cid() == cid)
    }

    pub fn position(&self, cid: ClientId) -> Option<usize> {
        self.items.iter().position(|item| item.cid() == cid)
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    fn build(&mut self, record: TodoRecord) -> TodoItem {
        let cid = ClientId::new(self.next_cid);
        self.next_cid += 1;
        TodoItem::new(cid, record)
    }

    /// Replace the collection with everything the adapter holds.
    pub fn fetch(&mut self) -> Vec<StoreEvent> {
        match self.adapter.find_all() {
            Ok(records) => {
                let items: Vec<TodoItem> = records.into_iter().map(|r| self.build(r)).collect();
                self.items = items;
                tracing::info!(method = %SyncMethod::Read, count = self.items.len(), "sync response");
                vec![
                    StoreEvent::Reset {
                        count: self.items.len(),
                    },
                    StoreEvent::Sync {
                        method: SyncMethod::Read,
                        item: None,
                    },
                ]
            }
            Err(e) => vec![sync_error(SyncMethod::Read, None, &e)],
        }
    }

    /// Re-read a single item from the adapter.
    pub fn refresh(&mut self, cid: ClientId) -> Vec<StoreEvent> {
        let Some(pos) = self.position(cid) else {
            tracing::warn!(%cid, "refresh of an item that is not in the store");
            return Vec::new();
        };
        let Some(id) = self.items[pos].id.clone() else {
            return Vec::new();
        };

        match self.adapter.find(&id) {
            Ok(record) => {
                let mut events = Vec::new();
                if self.items[pos].apply(record) {
                    events.push(StoreEvent::Change(self.items[pos].clone()));
                }
                events.push(sync_ok(SyncMethod::Read, cid, &self.items[pos]));
                events
            }
            Err(e) => vec![sync_error(SyncMethod::Read, Some(cid), &e)],
        }
    }

    pub fn dispatch_callback(&mut self, action: &TodoAction) -> Vec<StoreEvent> {
        match action {
            TodoAction::AddTodo { text } => self.add_todo(text),
            TodoAction::ToggleTodo { item } => self.toggle_todo(*item),
            TodoAction::ClearTodos => self.clear_todos(),
        }
    }

    fn add_todo(&mut self, text: &str) -> Vec<StoreEvent> {
        let item = self.build(TodoRecord::new(text));
        self.items.push(item);

        let pos = self.items.len() - 1;
        let outcome = self.save(pos);
        vec![StoreEvent::Add(self.items[pos].clone()), outcome]
    }

    fn toggle_todo(&mut self, cid: ClientId) -> Vec<StoreEvent> {
        let Some(pos) = self.position(cid) else {
            tracing::warn!(%cid, "toggle of an item that is not in the store");
            return Vec::new();
        };
        self.items[pos].complete = !self.items[pos].complete;

        let changed = StoreEvent::Change(self.items[pos].clone());
        let outcome = self.save(pos);
        vec![changed, outcome]
    }

    fn clear_todos(&mut self) -> Vec<StoreEvent> {
        let (completed, remaining): (Vec<TodoItem>, Vec<TodoItem>) =
            std::mem::take(&mut self.items)
                .into_iter()
                .partition(|item| item.complete);
        self.items = remaining;

        let mut events = Vec::new();
        for item in completed {
            let cid = item.cid();
            let outcome = item.id.as_ref().map(|id| match self.adapter.destroy(id) {
                Ok(_) => sync_ok(SyncMethod::Delete, cid, &item),
                Err(e) => sync_error(SyncMethod::Delete, Some(cid), &e),
            });
            events.push(StoreEvent::Remove(item));
            events.extend(outcome);
        }
        events
    }

    /// Persist the item at `pos`: create if it has never been saved, update
    /// otherwise. Stored attributes are copied back onto the item.
    fn save(&mut self, pos: usize) -> StoreEvent {
        let cid = self.items[pos].cid();
        let mut record = self.items[pos].to_record();
        let (method, result) = if self.items[pos].is_new() {
            (SyncMethod::Create, self.adapter.create(&mut record))
        } else {
            (SyncMethod::Update, self.adapter.update(&record))
        };

        match result {
            Ok(stored) => {
                self.items[pos].apply(stored);
                sync_ok(method, cid, &self.items[pos])
            }
            Err(e) => sync_error(method, Some(cid), &e),
        }
    }
}

fn sync_ok(method: SyncMethod, cid: ClientId, item: &TodoItem) -> StoreEvent {
    tracing::info!(
        %method,
        %cid,
        id = item.id.as_ref().map(|id| id.as_str()).unwrap_or_default(),
        "sync response"
    );
    StoreEvent::Sync {
        method,
        item: Some(cid),
    }
}

fn sync_error(method: SyncMethod, cid: Option<ClientId>, error: &TodoError) -> StoreEvent {
    tracing::error!(%method, cid = ?cid, %error, "sync error");
    StoreEvent::Error {
        method,
        item: cid,
        reason: error.to_string(),
    }
}
