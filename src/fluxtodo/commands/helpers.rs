use crate::actions::TodoAction;
use crate::app::TodoApp;
use crate::commands::CmdMessage;
use crate::error::Result;
use crate::events::StoreEvent;
use crate::sync::SyncAdapter;
use std::cell::RefCell;
use std::rc::Rc;

/// Dispatches `action` and returns every event the store emitted for it.
pub fn dispatch_collecting<A: SyncAdapter + 'static>(
    app: &TodoApp<A>,
    action: TodoAction,
) -> Result<Vec<StoreEvent>> {
    let collected = Rc::new(RefCell::new(Vec::new()));
    let subscription = {
        let collected = Rc::clone(&collected);
        app.subscribe(move |event: &StoreEvent| collected.borrow_mut().push(event.clone()))
    };

    let outcome = app.dispatch(action);
    subscription.cancel();
    outcome?;

    let events = collected.take();
    Ok(events)
}

/// Turns persistence failures into user-facing error messages.
pub fn sync_error_messages(events: &[StoreEvent]) -> Vec<CmdMessage> {
    events
        .iter()
        .filter_map(|event| match event {
            StoreEvent::Error { method, reason, .. } => Some(CmdMessage::error(format!(
                "Could not save change ({}): {}",
                method, reason
            ))),
            _ => None,
        })
        .collect()
}
