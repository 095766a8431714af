//! # fluxtodo Architecture
//!
//! fluxtodo is a todo-list **library built on a unidirectional data flow**, with a
//! small CLI on top. User intents become actions; actions go through a single
//! dispatcher; the store is the only thing that mutates todos; views observe the
//! store and re-render.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API / Command Layer (api.rs, commands/)                    │
//! │  - Resolves display indexes to item references              │
//! │  - Builds actions, collects store events into CmdResults    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ TodoAction
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Dispatcher (dispatcher.rs)                                 │
//! │  - Delivers every action to every registered callback       │
//! │  - Rejects dispatches made from inside a callback           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/, app.rs)                                     │
//! │  - Ordered collection of TodoItems                          │
//! │  - Applies actions, persists, emits StoreEvents             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Sync Layer (sync/, storage/)                               │
//! │  - LocalStorageAdapter: one JSON slot per collection        │
//! │  - FileStorage (production), MemoryStorage (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wiring
//!
//! There is no global dispatcher. A caller creates an
//! `Rc<Dispatcher<TodoAction>>` and hands it to each [`app::TodoApp`] it builds;
//! several stores may share one dispatcher. Dropping a `TodoApp` unregisters its
//! store callback.
//!
//! ## Persistence failures
//!
//! A failed write does not undo the in-memory change. It is logged and reported
//! as a [`events::StoreEvent::Error`] so observers (and the CLI) can tell the
//! user.
//!
//! ## Testing Strategy
//!
//! - **Store and dispatcher**: unit tests against `MemoryStorage`
//! - **Commands / API**: unit tests through `app::fixtures::memory_app`
//! - **CLI**: integration tests in `tests/` against a temp data directory

pub mod actions;
pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod index;
pub mod model;
pub mod storage;
pub mod store;
pub mod sync;
