//! Actions accepted by the dispatcher.
//!
//! The serde representation is the payload shape views send:
//! `{"action":"ADD_TODO","text":"..."}`, `{"action":"TOGGLE_TODO","item":3}`
//! and `{"action":"CLEAR_TODOS"}`.

use crate::model::ClientId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    AddTodo { text: String },
    ToggleTodo { item: ClientId },
    ClearTodos,
}

impl TodoAction {
    /// The wire tag, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            TodoAction::AddTodo { .. } => "ADD_TODO",
            TodoAction::ToggleTodo { .. } => "TOGGLE_TODO",
            TodoAction::ClearTodos => "CLEAR_TODOS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_shapes() {
        let add = TodoAction::AddTodo {
            text: "buy milk".into(),
        };
        assert_eq!(
            serde_json::to_string(&add).unwrap(),
            r#"{"action":"ADD_TODO","text":"buy milk"}"#
        );

        let toggle = TodoAction::ToggleTodo {
            item: ClientId::new(3),
        };
        assert_eq!(
            serde_json::to_string(&toggle).unwrap(),
            r#"{"action":"TOGGLE_TODO","item":3}"#
        );

        assert_eq!(
            serde_json::to_string(&TodoAction::ClearTodos).unwrap(),
            r#"{"action":"CLEAR_TODOS"}"#
        );
    }

    #[test]
    fn parses_view_payloads() {
        let action: TodoAction = serde_json::from_str(r#"{"action":"CLEAR_TODOS"}"#).unwrap();
        assert_eq!(action, TodoAction::ClearTodos);
        assert_eq!(action.name(), "CLEAR_TODOS");

        let err = serde_json::from_str::<TodoAction>(r#"{"action":"RENAME_TODO"}"#);
        assert!(err.is_err());
    }
}
