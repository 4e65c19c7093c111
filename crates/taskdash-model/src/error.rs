use std::fmt::Display;

use thiserror::Error;

use crate::task::TaskId;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("please enter a task title")]
    EmptyTitle,

    #[error("task {0} not found")]
    NotFound(TaskId),

    #[error("malformed persisted data under `{key}`: {source}")]
    MalformedPersistedData {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failure reported by a [`crate::storage::KeyValueStore`] backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to {op} `{key}`: {message}")]
pub struct StorageError {
    pub op: &'static str,
    pub key: String,
    pub message: String,
}

impl StorageError {
    pub fn read(key: &str, err: impl Display) -> Self {
        Self {
            op: "read",
            key: key.to_string(),
            message: err.to_string(),
        }
    }

    pub fn invalid_key(key: &str) -> Self {
        Self {
            op: "address",
            key: key.to_string(),
            message: "invalid storage key".to_string(),
        }
    }

    pub fn write(key: &str, err: impl Display) -> Self {
        Self {
            op: "write",
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {kind} `{value}`; expected one of: {expected}")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}
