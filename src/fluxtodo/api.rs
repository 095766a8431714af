//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UI
//! clients. It normalizes inputs (index strings → [`DisplayIndex`]) and
//! returns structured [`CmdResult`]s; it never prints.
//!
//! [`config`] and [`init`] only touch the data directory, so they are free
//! functions: they work even when the todo slot cannot be loaded.
//!
//! `TodoApi<A: SyncAdapter>` is generic over the sync adapter:
//! - Production: `TodoApi<LocalStorageAdapter<FileStorage>>`
//! - Testing: `TodoApi<LocalStorageAdapter<MemoryStorage>>`

use crate::app::TodoApp;
use crate::commands;
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::sync::SyncAdapter;
use std::path::Path;
use std::str::FromStr;

pub struct TodoApi<A: SyncAdapter + 'static> {
    app: TodoApp<A>,
}

impl<A: SyncAdapter + 'static> TodoApi<A> {
    pub fn new(app: TodoApp<A>) -> Self {
        Self { app }
    }

    pub fn add_todo(&self, text: &str) -> Result<commands::CmdResult> {
        commands::add::run(&self.app, text)
    }

    pub fn toggle_todos<I: AsRef<str>>(&self, indexes: &[I]) -> Result<commands::CmdResult> {
        let parsed = parse_indexes(indexes)?;
        commands::toggle::run(&self.app, &parsed)
    }

    pub fn clear_todos(&self) -> Result<commands::CmdResult> {
        commands::clear::run(&self.app)
    }

    pub fn list_todos(&self, filter: ListFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.app, filter)
    }

    pub fn app(&self) -> &TodoApp<A> {
        &self.app
    }
}

pub fn config(data_dir: &Path, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(data_dir, action)
}

pub fn init(data_dir: &Path) -> Result<commands::CmdResult> {
    commands::init::run(data_dir)
}

fn parse_indexes<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<DisplayIndex>> {
    inputs
        .iter()
        .map(|s| DisplayIndex::from_str(s.as_ref()))
        .collect()
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::list::ListFilter;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::fixtures::memory_app;
    use crate::error::TodoError;
    use crate::storage::memory::MemoryStorage;
    use tempfile::TempDir;

    fn api() -> TodoApi<crate::sync::LocalStorageAdapter<MemoryStorage>> {
        TodoApi::new(memory_app(&MemoryStorage::new()))
    }

    #[test]
    fn toggle_parses_string_indexes() {
        let api = api();
        api.add_todo("a").unwrap();
        api.add_todo("b").unwrap();

        api.toggle_todos(&["2"]).unwrap();

        let done = api.list_todos(ListFilter::Done).unwrap();
        assert_eq!(done.listed_items[0].item.text, "b");
    }

    #[test]
    fn bad_index_strings_are_api_errors() {
        let api = api();
        api.add_todo("a").unwrap();
        assert!(matches!(api.toggle_todos(&["x"]), Err(TodoError::Api(_))));
        assert!(matches!(api.toggle_todos(&["0"]), Err(TodoError::Api(_))));
    }

    #[test]
    fn clear_goes_through_the_store() {
        let api = api();
        api.add_todo("a").unwrap();
        api.toggle_todos(&["1"]).unwrap();
        api.clear_todos().unwrap();
        assert!(api.app().is_empty());
    }

    #[test]
    fn config_and_init_work_on_a_bare_data_dir() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("store");
        init(&data_dir).unwrap();
        config(&data_dir, ConfigAction::Set("slot-name".into(), "x".into())).unwrap();
        assert!(data_dir.join("config.json").exists());
    }
}
