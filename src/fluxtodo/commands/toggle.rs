use crate::actions::TodoAction;
use crate::app::TodoApp;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::events::StoreEvent;
use crate::index::{resolve, DisplayIndex};
use crate::sync::SyncAdapter;

use super::helpers::{dispatch_collecting, sync_error_messages};

pub fn run<A: SyncAdapter + 'static>(
    app: &TodoApp<A>,
    indexes: &[DisplayIndex],
) -> Result<CmdResult> {
    // Resolve everything up front so a bad index toggles nothing.
    let resolved = resolve(&app.items(), indexes)?;
    let mut result = CmdResult::default();

    for (display_index, cid) in resolved {
        let events = dispatch_collecting(app, TodoAction::ToggleTodo { item: cid })?;
        for event in &events {
            if let StoreEvent::Change(item) = event {
                let verb = if item.complete { "Completed" } else { "Reopened" };
                result.add_message(CmdMessage::success(format!(
                    "{} ({}): {}",
                    verb, display_index, item.text
                )));
                result.affected_items.push(item.clone());
            }
        }
        result.messages.extend(sync_error_messages(&events));
    }

    Ok(result)
}
