//! # Dispatcher
//!
//! A synchronous broadcast channel for actions. Every registered callback
//! receives every dispatched action, in registration order, before
//! [`Dispatcher::dispatch`] returns.
//!
//! The dispatcher is an ordinary value: construct one at startup, wrap it in
//! an `Rc`, and hand clones to the store and to every producer of actions.
//! There is no process-wide instance, so independent apps (and tests) never
//! share callbacks.
//!
//! Dispatching from inside a dispatch is rejected with
//! [`TodoError::ReentrantDispatch`]. Callbacks registered or unregistered while
//! a dispatch is running take effect from the next dispatch.

use crate::error::{Result, TodoError};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Dispatcher::register`], needed to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchToken(u64);

impl fmt::Display for DispatchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID_{}", self.0)
    }
}

type Callback<A> = Rc<RefCell<dyn FnMut(&A)>>;

pub struct Dispatcher<A> {
    callbacks: RefCell<Vec<(DispatchToken, Callback<A>)>>,
    next_token: Cell<u64>,
    dispatching: Cell<bool>,
}

impl<A> Default for Dispatcher<A> {
    fn default() -> Self {
        Self {
            callbacks: RefCell::new(Vec::new()),
            next_token: Cell::new(1),
            dispatching: Cell::new(false),
        }
    }
}

impl<A: fmt::Debug> Dispatcher<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&self, callback: F) -> DispatchToken
    where
        F: FnMut(&A) + 'static,
    {
        let token = DispatchToken(self.next_token.get());
        self.next_token.set(token.0 + 1);
        let callback: Callback<A> = Rc::new(RefCell::new(callback));
        self.callbacks.borrow_mut().push((token, callback));
        tracing::trace!(%token, "registered dispatch callback");
        token
    }

    pub fn unregister(&self, token: DispatchToken) -> Result<()> {
        let mut callbacks = self.callbacks.borrow_mut();
        let position = callbacks
            .iter()
            .position(|(t, _)| *t == token)
            .ok_or(TodoError::UnknownToken(token))?;
        callbacks.remove(position);
        tracing::trace!(%token, "unregistered dispatch callback");
        Ok(())
    }

    pub fn is_dispatching(&self) -> bool {
        self.dispatching.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.callbacks.borrow().len()
    }

    pub fn dispatch(&self, action: &A) -> Result<()> {
        if self.dispatching.get() {
            tracing::error!(?action, "rejected dispatch while another dispatch is running");
            return Err(TodoError::ReentrantDispatch);
        }

        // Snapshot so callbacks may register/unregister without invalidating the walk.
        let callbacks: Vec<Callback<A>> = self
            .callbacks
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        tracing::debug!(?action, subscribers = callbacks.len(), "dispatching");

        let _guard = DispatchGuard::start(&self.dispatching);
        for callback in callbacks {
            (*callback.borrow_mut())(action);
        }
        Ok(())
    }
}

/// Clears the dispatching flag even if a callback panics.
struct DispatchGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> DispatchGuard<'a> {
    fn start(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
