use crate::actions::TodoAction;
use crate::app::TodoApp;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TodoError};
use crate::events::StoreEvent;
use crate::sync::SyncAdapter;

use super::helpers::{dispatch_collecting, sync_error_messages};

pub fn run<A: SyncAdapter + 'static>(app: &TodoApp<A>, text: &str) -> Result<CmdResult> {
    if text.trim().is_empty() {
        return Err(TodoError::Api("Todo text cannot be empty".into()));
    }

    let events = dispatch_collecting(
        app,
        TodoAction::AddTodo {
            text: text.to_string(),
        },
    )?;

    let mut result = CmdResult::default();
    for event in &events {
        if let StoreEvent::Add(item) = event {
            result.add_message(CmdMessage::success(format!(
                "Added ({}): {}",
                app.len(),
                item.text
            )));
            result.affected_items.push(item.clone());
        }
    }
    result.messages.extend(sync_error_messages(&events));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::fixtures::memory_app;
    use crate::storage::memory::MemoryStorage;

    #[test]
    fn appends_and_reports_position() {
        let app = memory_app(&MemoryStorage::new());
        run(&app, "buy milk").unwrap();
        let result = run(&app, "walk dog").unwrap();

        assert_eq!(app.len(), 2);
        assert_eq!(result.affected_items[0].text, "walk dog");
        assert_eq!(result.messages[0].content, "Added (2): walk dog");
        assert!(!result.has_errors());
    }

    #[test]
    fn rejects_empty_text_without_dispatching() {
        let app = memory_app(&MemoryStorage::new());
        assert!(matches!(run(&app, ""), Err(TodoError::Api(_))));
        assert!(matches!(run(&app, "   "), Err(TodoError::Api(_))));
        assert!(app.is_empty());
    }

    #[test]
    fn persistence_failure_is_reported_but_item_kept() {
        let storage = MemoryStorage::new();
        let app = memory_app(&storage);
        storage.set_simulate_write_error(true);

        let result = run(&app, "fragile").unwrap();

        assert_eq!(app.len(), 1);
        assert!(result.has_errors());
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.starts_with("Could not save change (create)")));
    }
}
