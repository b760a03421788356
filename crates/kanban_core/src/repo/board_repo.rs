//! Board repository contract shared by every store backend.

use crate::db::DbError;
use crate::model::comment::Comment;
use crate::model::label::Label;
use crate::model::task::{Task, TaskId};
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for board persistence and lookup operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// No task has this id.
    TaskNotFound(TaskId),
    /// Stored version differs from the one the caller expected.
    VersionMismatch {
        id: TaskId,
        expected: u64,
        actual: u64,
    },
    /// Insert collided with an existing id.
    DuplicateId(String),
    InvalidData(String),
    /// Store cannot serve requests (e.g. poisoned lock).
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::VersionMismatch {
                id,
                expected,
                actual,
            } => write!(
                f,
                "task {id} version mismatch: expected {expected}, found {actual}"
            ),
            Self::DuplicateId(id) => write!(f, "duplicate entity id: {id}"),
            Self::InvalidData(message) => write!(f, "invalid board data: {message}"),
            Self::Unavailable(message) => write!(f, "board store unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Entity Store operations.
///
/// Every method is atomic: it either fully applies or leaves the store
/// untouched. Returned values are owned copies; mutating them never affects
/// stored state.
pub trait BoardRepository {
    /// Returns the task or `TaskNotFound`.
    fn get_task(&self, id: &str) -> RepoResult<Task>;
    /// Returns all tasks in store order (most recently created first).
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Adds a brand-new task; it becomes first in store order.
    fn insert_task(&self, task: &Task) -> RepoResult<()>;
    /// Overwrites the task at `task.id` only if its stored version equals
    /// `expected_version`. `task.version` must be `expected_version + 1`.
    fn replace_task(&self, task: &Task, expected_version: u64) -> RepoResult<()>;
    /// Deletes a task and all of its comments. Returns whether it existed.
    fn remove_task(&self, id: &str) -> RepoResult<bool>;
    /// Adds a comment if its owning task exists, else `TaskNotFound`.
    fn insert_comment(&self, comment: &Comment) -> RepoResult<()>;
    /// Returns comments for one task, most recently inserted first.
    fn list_comments_for(&self, task_id: &str) -> RepoResult<Vec<Comment>>;
    /// Returns all labels in seed order.
    fn list_labels(&self) -> RepoResult<Vec<Label>>;
    /// Seeds one label. Not exposed through the board API.
    fn insert_label(&self, label: &Label) -> RepoResult<()>;
}

/// Checks the shape of a replacement before any store mutation.
pub(crate) fn ensure_replacement_version(task: &Task, expected_version: u64) -> RepoResult<()> {
    if expected_version.checked_add(1) != Some(task.version) {
        return Err(RepoError::InvalidData(format!(
            "replacement for task {} must carry version {} + 1, got {}",
            task.id, expected_version, task.version
        )));
    }
    Ok(())
}
