use crate::actions::TodoAction;
use crate::app::TodoApp;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::events::StoreEvent;
use crate::sync::SyncAdapter;

use super::helpers::{dispatch_collecting, sync_error_messages};

pub fn run<A: SyncAdapter + 'static>(app: &TodoApp<A>) -> Result<CmdResult> {
    let events = dispatch_collecting(app, TodoAction::ClearTodos)?;
    let mut result = CmdResult::default();

    for event in &events {
        if let StoreEvent::Remove(item) = event {
            result.add_message(CmdMessage::success(format!("Cleared: {}", item.text)));
            result.affected_items.push(item.clone());
        }
    }
    if result.affected_items.is_empty() {
        result.add_message(CmdMessage::info("No completed todos to clear."));
    }
    result.messages.extend(sync_error_messages(&events));
    Ok(result)
}
