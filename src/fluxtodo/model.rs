use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Persistent identifier of a todo, assigned by the sync adapter on first create.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TodoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Process-local handle for an in-memory todo. Valid whether or not the
/// todo has been persisted, and never written to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(u64);

impl ClientId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// The serialized attribute set of a todo, as stored in a persistence slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TodoRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoId>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub complete: bool,
}

impl TodoRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            complete: false,
        }
    }
}

/// A todo held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    cid: ClientId,
    pub id: Option<TodoId>,
    pub text: String,
    pub complete: bool,
}

impl TodoItem {
    pub fn new(cid: ClientId, record: TodoRecord) -> Self {
        Self {
            cid,
            id: record.id,
            text: record.text,
            complete: record.complete,
        }
    }

    pub fn cid(&self) -> ClientId {
        self.cid
    }

    /// True until the item has been assigned a persistent id.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn to_record(&self) -> TodoRecord {
        TodoRecord {
            id: self.id.clone(),
            text: self.text.clone(),
            complete: self.complete,
        }
    }

    /// Copies stored attributes onto the item. Returns whether anything changed.
    pub fn apply(&mut self, record: TodoRecord) -> bool {
        let changed =
            self.id != record.id || self.text != record.text || self.complete != record.complete;
        self.id = record.id;
        self.text = record.text;
        self.complete = record.complete;
        changed
    }
}
