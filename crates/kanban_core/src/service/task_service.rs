//! Mutation Protocol: optimistic-concurrency task writes.
//!
//! # Responsibility
//! - Create, update and delete tasks; append comments.
//! - Enforce the version guard that prevents lost updates.
//!
//! # Invariants
//! - A failed operation never mutates the store.
//! - Successful update sets `version = previous + 1`.
//! - Any version mismatch rejects the whole update with `Conflict`; no
//!   field-level merge is attempted.
//! - Delete is unconditional and idempotent; it does not check versions.

use crate::model::comment::Comment;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::model::validation::ValidationError;
use crate::repo::board_repo::{BoardRepository, RepoError};
use crate::service::clock::MonotonicClock;
use crate::service::error::{BoardError, BoardResult};
use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize};

/// Input for creating one task. Status is always forced to `Todo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub label_id: Option<String>,
}

impl CreateTaskRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update guarded by the caller's last observed version.
///
/// `description`, `label_id` and `attachment_url` are tri-state:
/// `None` leaves the field, `Some(None)` clears it, `Some(Some(v))` sets it.
/// A blank value is treated as a clear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub id: TaskId,
    pub version: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub label_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub attachment_url: Option<Option<String>>,
}

impl UpdateTaskRequest {
    pub fn new(id: impl Into<TaskId>, version: u64) -> Self {
        Self {
            id: id.into(),
            version,
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn label_id(mut self, label_id: Option<String>) -> Self {
        self.label_id = Some(label_id);
        self
    }

    pub fn attachment_url(mut self, attachment_url: Option<String>) -> Self {
        self.attachment_url = Some(attachment_url);
        self
    }

    /// Checks request-only invariants before touching the store.
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = self.title.as_deref() {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyTitle);
            }
        }
        Ok(())
    }

    /// Merges provided fields over `current`; absent fields stay unchanged.
    fn merge_into(self, mut current: Task) -> Task {
        if let Some(title) = self.title {
            current.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            current.description = non_blank(description);
        }
        if let Some(status) = self.status {
            current.status = status;
        }
        if let Some(label_id) = self.label_id {
            current.label_id = non_blank(label_id);
        }
        if let Some(attachment_url) = self.attachment_url {
            current.attachment_url = non_blank(attachment_url);
        }
        current
    }
}

/// Input for appending one comment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    pub task_id: TaskId,
    pub body: String,
}

impl AddCommentRequest {
    pub fn new(task_id: impl Into<TaskId>, body: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            body: body.into(),
        }
    }
}

/// Acknowledgement returned by delete, whether or not the task existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedTask {
    pub id: TaskId,
}

/// The only writer of board state.
pub struct TaskMutationService<'repo, R: BoardRepository + ?Sized> {
    repo: &'repo R,
    clock: &'repo MonotonicClock,
}

impl<'repo, R: BoardRepository + ?Sized> TaskMutationService<'repo, R> {
    pub fn new(repo: &'repo R, clock: &'repo MonotonicClock) -> Self {
        Self { repo, clock }
    }

    /// Creates a task at version 0 in `Todo`, first in store order.
    ///
    /// # Errors
    /// - `Validation` when the title is blank after trim.
    pub fn create_task(&self, request: CreateTaskRequest) -> BoardResult<Task> {
        if request.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }

        let mut task = Task::new(request.title, self.clock.now_ms());
        task.description = non_blank(request.description);
        task.label_id = non_blank(request.label_id);

        self.repo.insert_task(&task)?;
        info!(
            "event=task_create module=service status=ok task_id={} has_label={}",
            task.id,
            task.label_id.is_some()
        );
        Ok(task)
    }

    /// Applies a partial update if the caller's version is current.
    ///
    /// # Errors
    /// - `Validation` when a provided title is blank.
    /// - `NotFound` when no task has `request.id`.
    /// - `Conflict` when `request.version` is not the stored version, either
    ///   at read time or at the atomic write.
    pub fn update_task(&self, request: UpdateTaskRequest) -> BoardResult<Task> {
        request.validate()?;

        let current = self.repo.get_task(&request.id)?;
        if request.version != current.version {
            warn!(
                "event=task_update module=service status=conflict task_id={} expected_version={} actual_version={}",
                current.id, request.version, current.version
            );
            return Err(BoardError::Conflict {
                id: current.id,
                expected: request.version,
                actual: current.version,
            });
        }

        let observed_version = current.version;
        let mut next = request.merge_into(current);
        next.version = observed_version + 1;
        next.updated_at = self.clock.now_ms();

        match self.repo.replace_task(&next, observed_version) {
            Ok(()) => {}
            Err(RepoError::VersionMismatch {
                id,
                expected,
                actual,
            }) => {
                warn!(
                    "event=task_update module=service status=conflict task_id={id} expected_version={expected} actual_version={actual} stage=write"
                );
                return Err(BoardError::Conflict {
                    id,
                    expected,
                    actual,
                });
            }
            Err(err) => return Err(err.into()),
        }

        info!(
            "event=task_update module=service status=ok task_id={} version={}",
            next.id, next.version
        );
        Ok(next)
    }

    /// Removes a task and its comments. Missing ids are a no-op.
    pub fn delete_task(&self, id: &str) -> BoardResult<DeletedTask> {
        let existed = self.repo.remove_task(id)?;
        info!("event=task_delete module=service status=ok task_id={id} existed={existed}");
        Ok(DeletedTask { id: id.to_string() })
    }

    /// Appends a comment to an existing task.
    ///
    /// # Errors
    /// - `Validation` when the body is blank after trim.
    /// - `NotFound` when the task does not exist.
    pub fn add_comment(&self, request: AddCommentRequest) -> BoardResult<Comment> {
        if request.body.trim().is_empty() {
            return Err(ValidationError::EmptyCommentBody.into());
        }

        let comment = Comment::new(request.task_id, request.body, self.clock.now_ms());
        self.repo.insert_comment(&comment)?;
        info!(
            "event=comment_add module=service status=ok task_id={} comment_id={}",
            comment.task_id, comment.id
        );
        Ok(comment)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn deserialize_patch<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
