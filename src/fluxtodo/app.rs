//! # App Wiring
//!
//! [`TodoApp`] connects the three moving parts: it registers the store with
//! a dispatcher, and forwards the events each dispatch produces to the
//! store's observers.
//!
//! ```text
//! producer ──dispatch──▶ Dispatcher ──▶ TodoStore::dispatch_callback
//!                                              │ events
//!                                              ▼
//!                                   Observers<StoreEvent> ──▶ views
//! ```
//!
//! Events are delivered after the store's borrow is released, so an observer
//! may read the store (through [`TodoApp::items`] or [`TodoApp::with_store`])
//! while handling one. An observer that dispatches gets
//! [`crate::error::TodoError::ReentrantDispatch`].

use crate::actions::TodoAction;
use crate::dispatcher::{DispatchToken, Dispatcher};
use crate::error::Result;
use crate::events::{Observers, StoreEvent, Subscription};
use crate::model::{ClientId, TodoItem};
use crate::store::TodoStore;
use crate::sync::SyncAdapter;
use std::cell::RefCell;
use std::rc::Rc;

pub struct TodoApp<A: SyncAdapter + 'static> {
    dispatcher: Rc<Dispatcher<TodoAction>>,
    store: Rc<RefCell<TodoStore<A>>>,
    observers: Observers<StoreEvent>,
    token: DispatchToken,
}

impl<A: SyncAdapter + 'static> TodoApp<A> {
    /// Loads the store from `adapter` and registers it with `dispatcher`.
    pub fn new(dispatcher: Rc<Dispatcher<TodoAction>>, adapter: A) -> Self {
        let (store, _loaded) = TodoStore::load(adapter);
        let store = Rc::new(RefCell::new(store));
        let observers = Observers::new();

        let token = {
            let store = Rc::clone(&store);
            let observers = observers.clone();
            dispatcher.register(move |action: &TodoAction| {
                let events = store.borrow_mut().dispatch_callback(action);
                observers.emit_all(&events);
            })
        };
        tracing::debug!(%token, "todo store registered");

        Self {
            dispatcher,
            store,
            observers,
            token,
        }
    }

    pub fn dispatcher(&self) -> &Rc<Dispatcher<TodoAction>> {
        &self.dispatcher
    }

    pub fn dispatch(&self, action: TodoAction) -> Result<()> {
        self.dispatcher.dispatch(&action)
    }

    /// Register a view. The listener stays active while the handle lives.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.observers.subscribe(listener)
    }

    /// Snapshot of the current items, in order.
    pub fn items(&self) -> Vec<TodoItem> {
        self.store.borrow().items().to_vec()
    }

    pub fn len(&self) -> usize {
        self.store.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.borrow().is_empty()
    }

    pub fn with_store<R>(&self, f: impl FnOnce(&TodoStore<A>) -> R) -> R {
        f(&self.store.borrow())
    }

    /// Re-read one item from persistence, notifying observers of any change.
    pub fn refresh(&self, cid: ClientId) {
        let events = self.store.borrow_mut().refresh(cid);
        self.observers.emit_all(&events);
    }
}

impl<A: SyncAdapter + 'static> Drop for TodoApp<A> {
    fn drop(&mut self) {
        if let Err(e) = self.dispatcher.unregister(self.token) {
            tracing::warn!(error = %e, "todo store was already unregistered");
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::storage::memory::MemoryStorage;
    use crate::sync::LocalStorageAdapter;

    pub type MemoryApp = TodoApp<LocalStorageAdapter<MemoryStorage>>;

    pub const TEST_SLOT: &str = "todos";

    /// An app with its own dispatcher over `storage`.
    pub fn memory_app(storage: &MemoryStorage) -> MemoryApp {
        let adapter = LocalStorageAdapter::new(TEST_SLOT, storage.clone()).unwrap();
        TodoApp::new(Rc::new(Dispatcher::new()), adapter)
    }
}
