//! In-memory board repository.
//!
//! # Invariants
//! - All three collections sit behind one mutex, so every operation is a
//!   single exclusive critical section.
//! - Tasks and comments are prepended on insert; labels keep seed order.
//! - A poisoned lock is reported as `Unavailable`, never as a panic.

use crate::model::comment::Comment;
use crate::model::label::Label;
use crate::model::task::Task;
use crate::repo::board_repo::{
    ensure_replacement_version, BoardRepository, RepoError, RepoResult,
};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct BoardState {
    tasks: Vec<Task>,
    comments: Vec<Comment>,
    labels: Vec<Label>,
}

impl BoardState {
    fn task_index(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

/// Mutex-guarded in-memory store.
#[derive(Debug, Default)]
pub struct InMemoryBoardRepository {
    state: Mutex<BoardState>,
}

impl InMemoryBoardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, BoardState>> {
        self.state
            .lock()
            .map_err(|_| RepoError::Unavailable("board store lock poisoned".to_string()))
    }
}

impl BoardRepository for InMemoryBoardRepository {
    fn get_task(&self, id: &str) -> RepoResult<Task> {
        let state = self.lock()?;
        state
            .tasks
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or_else(|| RepoError::TaskNotFound(id.to_string()))
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        Ok(self.lock()?.tasks.clone())
    }

    fn insert_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;
        let mut state = self.lock()?;
        if state.task_index(&task.id).is_some() {
            return Err(RepoError::DuplicateId(task.id.clone()));
        }
        state.tasks.insert(0, task.clone());
        Ok(())
    }

    fn replace_task(&self, task: &Task, expected_version: u64) -> RepoResult<()> {
        task.validate()?;
        ensure_replacement_version(task, expected_version)?;

        let mut state = self.lock()?;
        let index = state
            .task_index(&task.id)
            .ok_or_else(|| RepoError::TaskNotFound(task.id.clone()))?;
        let stored = &mut state.tasks[index];
        if stored.version != expected_version {
            return Err(RepoError::VersionMismatch {
                id: task.id.clone(),
                expected: expected_version,
                actual: stored.version,
            });
        }
        *stored = task.clone();
        Ok(())
    }

    fn remove_task(&self, id: &str) -> RepoResult<bool> {
        let mut state = self.lock()?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id != id);
        state.comments.retain(|comment| comment.task_id != id);
        Ok(state.tasks.len() != before)
    }

    fn insert_comment(&self, comment: &Comment) -> RepoResult<()> {
        comment.validate()?;
        let mut state = self.lock()?;
        if state.task_index(&comment.task_id).is_none() {
            return Err(RepoError::TaskNotFound(comment.task_id.clone()));
        }
        if state.comments.iter().any(|existing| existing.id == comment.id) {
            return Err(RepoError::DuplicateId(comment.id.clone()));
        }
        state.comments.insert(0, comment.clone());
        Ok(())
    }

    fn list_comments_for(&self, task_id: &str) -> RepoResult<Vec<Comment>> {
        let state = self.lock()?;
        Ok(state
            .comments
            .iter()
            .filter(|comment| comment.task_id == task_id)
            .cloned()
            .collect())
    }

    fn list_labels(&self) -> RepoResult<Vec<Label>> {
        Ok(self.lock()?.labels.clone())
    }

    fn insert_label(&self, label: &Label) -> RepoResult<()> {
        label.validate()?;
        let mut state = self.lock()?;
        if state.labels.iter().any(|existing| existing.id == label.id) {
            return Err(RepoError::DuplicateId(label.id.clone()));
        }
        state.labels.push(label.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryBoardRepository;
    use crate::model::comment::Comment;
    use crate::model::task::Task;
    use crate::repo::board_repo::{BoardRepository, RepoError};

    #[test]
    fn insert_prepends_and_get_returns_copy() {
        let repo = InMemoryBoardRepository::new();
        repo.insert_task(&Task::with_id("a", "first", 1)).unwrap();
        repo.insert_task(&Task::with_id("b", "second", 2)).unwrap();

        let ids: Vec<_> = repo.list_tasks().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, ["b", "a"]);

        let mut copy = repo.get_task("a").unwrap();
        copy.title = "mutated".to_string();
        assert_eq!(repo.get_task("a").unwrap().title, "first");
    }

    #[test]
    fn replace_rejects_stale_expected_version() {
        let repo = InMemoryBoardRepository::new();
        let task = Task::with_id("a", "first", 1);
        repo.insert_task(&task).unwrap();

        let mut next = task.clone();
        next.version = 1;
        repo.replace_task(&next, 0).unwrap();

        let mut stale = task.clone();
        stale.version = 1;
        let err = repo.replace_task(&stale, 0).unwrap_err();
        assert!(matches!(
            err,
            RepoError::VersionMismatch { expected: 0, actual: 1, .. }
        ));
    }

    #[test]
    fn replace_rejects_version_jump() {
        let repo = InMemoryBoardRepository::new();
        let mut task = Task::with_id("a", "first", 1);
        repo.insert_task(&task).unwrap();
        task.version = 5;
        assert!(matches!(
            repo.replace_task(&task, 0),
            Err(RepoError::InvalidData(_))
        ));
        assert_eq!(repo.get_task("a").unwrap().version, 0);
    }

    #[test]
    fn insert_comment_requires_existing_task() {
        let repo = InMemoryBoardRepository::new();
        let err = repo
            .insert_comment(&Comment::new("missing", "hello", 1))
            .unwrap_err();
        assert!(matches!(err, RepoError::TaskNotFound(id) if id == "missing"));
    }

    #[test]
    fn duplicate_task_id_is_rejected() {
        let repo = InMemoryBoardRepository::new();
        repo.insert_task(&Task::with_id("a", "first", 1)).unwrap();
        assert!(matches!(
            repo.insert_task(&Task::with_id("a", "again", 2)),
            Err(RepoError::DuplicateId(_))
        ));
        assert_eq!(repo.list_tasks().unwrap().len(), 1);
    }
}
