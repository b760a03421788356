//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record rendered on the board.
//! - Own the status enum and its stable storage tokens.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `version` starts at 0 and grows by exactly 1 per successful update.
//! - `title` is never blank.
//! - `label_id` is a weak reference and may point at nothing.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque task identifier.
pub type TaskId = String;

/// Generates a fresh opaque id for any board entity.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Board column a task belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Created but not started.
    #[default]
    Todo,
    /// Work is in progress.
    InProgress,
    /// Completed.
    Done,
}

impl TaskStatus {
    /// Column order on the board.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Stable token used by persistence.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Parses a persistence token.
    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(Self::Todo),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Parses the wire name (`Todo|InProgress|Done`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Todo" => Some(Self::Todo),
            "InProgress" => Some(Self::InProgress),
            "Done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Wire name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
        }
    }

    /// Human-readable column title.
    pub fn display_label(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Weak reference to a `Label`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_id: Option<String>,
    /// Browser-local object reference; never an uploaded blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    pub version: u64,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl Task {
    /// Creates a brand-new task in `Todo` at version 0.
    ///
    /// # Invariants
    /// - `created_at == updated_at == now_ms`.
    /// - Title is stored trimmed.
    pub fn new(title: impl Into<String>, now_ms: i64) -> Self {
        Self::with_id(generate_id(), title, now_ms)
    }

    /// Creates a new task with a caller-provided id.
    ///
    /// Used by seeding paths where identity already exists externally.
    pub fn with_id(id: impl Into<TaskId>, title: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into().trim().to_string(),
            description: None,
            status: TaskStatus::Todo,
            label_id: None,
            attachment_url: None,
            version: 0,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Checks write-path invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}
