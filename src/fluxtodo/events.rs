//! # Change Notification
//!
//! Views learn about store changes by subscribing to [`StoreEvent`]s. Every
//! subscription returns a [`Subscription`] handle; the callback stays
//! registered exactly as long as the handle is alive. Dropping the handle (or
//! calling [`Subscription::cancel`]) releases the callback, so a torn-down
//! view cannot leave a dangling listener behind.

use crate::model::{ClientId, TodoItem};
use crate::sync::SyncMethod;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Notifications emitted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// An item was appended to the collection.
    Add(TodoItem),
    /// An item was removed from the collection.
    Remove(TodoItem),
    /// An item's attributes changed.
    Change(TodoItem),
    /// The collection was replaced wholesale (initial load).
    Reset { count: usize },
    /// A persistence round trip succeeded.
    Sync {
        method: SyncMethod,
        item: Option<ClientId>,
    },
    /// A persistence round trip failed. The in-memory state is left as is.
    Error {
        method: SyncMethod,
        item: Option<ClientId>,
        reason: String,
    },
}

impl StoreEvent {
    /// Add, remove, change and reset events; the ones a view re-renders on.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, StoreEvent::Sync { .. } | StoreEvent::Error { .. })
    }
}

type Listener<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct ListenerList<E> {
    next_id: u64,
    entries: Vec<(u64, Listener<E>)>,
}

/// A list of event listeners. Clones share the same list.
pub struct Observers<E> {
    inner: Rc<RefCell<ListenerList<E>>>,
}

impl<E> Clone for Observers<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ListenerList {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }
}

impl<E: 'static> Observers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "the listener is removed as soon as the subscription is dropped"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&E) + 'static,
    {
        let mut list = self.inner.borrow_mut();
        let id = list.next_id;
        list.next_id += 1;
        let listener: Listener<E> = Rc::new(RefCell::new(listener));
        list.entries.push((id, listener));

        let weak: Weak<RefCell<ListenerList<E>>> = Rc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().entries.retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers `event` to every listener registered when the call starts.
    pub fn emit(&self, event: &E) {
        let listeners: Vec<Listener<E>> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            (*listener.borrow_mut())(event);
        }
    }

    pub fn emit_all(&self, events: &[E]) {
        for event in events {
            self.emit(event);
        }
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unsubscribes now. Equivalent to dropping the handle.
    pub fn cancel(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_to_live_subscriptions_only() {
        let observers = Observers::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sub = {
            let seen = Rc::clone(&seen);
            observers.subscribe(move |n| seen.borrow_mut().push(*n))
        };
        observers.emit(&1);
        drop(sub);
        observers.emit(&2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert!(observers.is_empty());
    }

    #[test]
    fn cancel_releases_listener() {
        let observers = Observers::<u32>::new();
        let a = observers.subscribe(|_| {});
        let _b = observers.subscribe(|_| {});
        assert_eq!(observers.len(), 2);

        a.cancel();
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn subscription_outliving_observers_is_harmless() {
        let observers = Observers::<u32>::new();
        let sub = observers.subscribe(|_| {});
        drop(observers);
        drop(sub);
    }

    #[test]
    fn listener_may_unsubscribe_another_during_emit() {
        let observers = Observers::<u32>::new();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(RefCell::new(0));

        let _killer = {
            let victim = Rc::clone(&victim);
            observers.subscribe(move |_| {
                victim.borrow_mut().take();
            })
        };
        *victim.borrow_mut() = Some({
            let hits = Rc::clone(&hits);
            observers.subscribe(move |_| *hits.borrow_mut() += 1)
        });

        // Both listeners were registered when the first emit started.
        observers.emit(&1);
        observers.emit(&2);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn sync_and_error_are_not_mutations() {
        let sync = StoreEvent::Sync {
            method: SyncMethod::Read,
            item: None,
        };
        assert!(!sync.is_mutation());
        assert!(StoreEvent::Reset { count: 0 }.is_mutation());
    }
}
