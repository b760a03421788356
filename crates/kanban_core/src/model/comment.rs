//! Comment domain model.
//!
//! Comments are append-only: never updated, only created or removed together
//! with their owning task.

use crate::model::task::{generate_id, TaskId};
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Opaque comment identifier.
pub type CommentId = String;

/// One comment attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    /// Weak reference to the owning task.
    pub task_id: TaskId,
    pub body: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Comment {
    /// Creates a comment with a generated id.
    pub fn new(task_id: impl Into<TaskId>, body: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id: generate_id(),
            task_id: task_id.into(),
            body: body.into(),
            created_at: now_ms,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.body.trim().is_empty() {
            return Err(ValidationError::EmptyCommentBody);
        }
        Ok(())
    }
}
