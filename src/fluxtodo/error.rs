use crate::dispatcher::DispatchToken;
use crate::model::TodoId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Todo not found: {0}")]
    NotFound(TodoId),

    #[error("Todo has no id (it was never persisted)")]
    MissingId,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Cannot dispatch in the middle of a dispatch")]
    ReentrantDispatch,

    #[error("Dispatcher does not map to a registered callback: {0}")]
    UnknownToken(DispatchToken),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, TodoError>;
