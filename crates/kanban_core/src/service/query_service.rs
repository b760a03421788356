//! Query Engine: read-only task, comment and label views.
//!
//! # Responsibility
//! - Apply ad-hoc task filters over store order.
//! - Derive newest-first, capped comment listings.
//! - Group a listing into board columns.
//!
//! # Invariants
//! - Never mutates the store.
//! - Listing order is store order; no extra sort is applied to tasks.
//! - All returned values are owned copies.

use crate::model::comment::Comment;
use crate::model::label::Label;
use crate::model::task::{Task, TaskStatus};
use crate::repo::board_repo::BoardRepository;
use crate::service::error::BoardResult;
use serde::{Deserialize, Serialize};

/// Maximum number of comments returned for one task.
pub const COMMENTS_LIMIT: usize = 10;

/// Optional task predicates, ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskFilter {
    /// Case-insensitive title substring. Blank imposes no constraint.
    #[serde(alias = "q")]
    pub text_query: Option<String>,
    /// Exact status match.
    pub status: Option<TaskStatus>,
    /// Exact label id match. Blank imposes no constraint.
    pub label_id: Option<String>,
}

impl TaskFilter {
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            text_query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn label(label_id: impl Into<String>) -> Self {
        Self {
            label_id: Some(label_id.into()),
            ..Self::default()
        }
    }

    /// Trimmed, lowercased text query, or `None` when blank.
    pub fn normalized_query(&self) -> Option<String> {
        self.text_query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .map(str::to_lowercase)
    }

    /// Label id, or `None` when blank.
    pub fn normalized_label_id(&self) -> Option<&str> {
        self.label_id
            .as_deref()
            .filter(|label_id| !label_id.trim().is_empty())
    }

    /// Returns whether this filter imposes no constraint at all.
    pub fn is_empty(&self) -> bool {
        self.normalized_query().is_none()
            && self.status.is_none()
            && self.normalized_label_id().is_none()
    }

    /// Returns whether `task` satisfies every present predicate.
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_with(task, self.normalized_query().as_deref())
    }

    fn matches_with(&self, task: &Task, query: Option<&str>) -> bool {
        if let Some(query) = query {
            if !task.title.to_lowercase().contains(query) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(label_id) = self.normalized_label_id() {
            if task.label_id.as_deref() != Some(label_id) {
                return false;
            }
        }
        true
    }

    /// Keeps matching tasks, preserving relative order.
    pub fn apply(&self, mut tasks: Vec<Task>) -> Vec<Task> {
        let query = self.normalized_query();
        tasks.retain(|task| self.matches_with(task, query.as_deref()));
        tasks
    }
}

/// A listing split into the three status columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumns {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl BoardColumns {
    /// Groups tasks by status, keeping listing order inside each column.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut columns = Self::default();
        for task in tasks {
            match task.status {
                TaskStatus::Todo => columns.todo.push(task),
                TaskStatus::InProgress => columns.in_progress.push(task),
                TaskStatus::Done => columns.done.push(task),
            }
        }
        columns
    }

    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    pub fn total(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Read-only view over a board repository.
pub struct TaskQueryService<'repo, R: BoardRepository + ?Sized> {
    repo: &'repo R,
}

impl<'repo, R: BoardRepository + ?Sized> TaskQueryService<'repo, R> {
    pub fn new(repo: &'repo R) -> Self {
        Self { repo }
    }

    /// Lists tasks matching `filter` in store order.
    pub fn list_tasks(&self, filter: &TaskFilter) -> BoardResult<Vec<Task>> {
        let tasks = self.repo.list_tasks()?;
        Ok(filter.apply(tasks))
    }

    pub fn get_task(&self, id: &str) -> BoardResult<Task> {
        Ok(self.repo.get_task(id)?)
    }

    /// Lists at most `COMMENTS_LIMIT` comments, newest first.
    ///
    /// Ties on `created_at` keep the store's most-recently-inserted-first
    /// order because the sort is stable.
    pub fn list_comments(&self, task_id: &str) -> BoardResult<Vec<Comment>> {
        let mut comments = self.repo.list_comments_for(task_id)?;
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        comments.truncate(COMMENTS_LIMIT);
        Ok(comments)
    }

    pub fn list_labels(&self) -> BoardResult<Vec<Label>> {
        Ok(self.repo.list_labels()?)
    }

}

#[cfg(test)]
mod tests {
    use super::{BoardColumns, TaskFilter};
    use crate::model::task::{Task, TaskStatus};

    fn task(id: &str, title: &str, status: TaskStatus, label: Option<&str>) -> Task {
        let mut task = Task::with_id(id, title, 1);
        task.status = status;
        task.label_id = label.map(str::to_string);
        task
    }

    #[test]
    fn blank_text_query_is_no_constraint() {
        let filter = TaskFilter::text("   ");
        assert!(filter.is_empty());
        assert!(filter.matches(&task("a", "anything", TaskStatus::Todo, None)));
    }

    #[test]
    fn text_query_is_trimmed_and_case_folded() {
        let filter = TaskFilter::text("  QA ");
        assert!(filter.matches(&task("a", "qa チェック", TaskStatus::Done, None)));
        assert!(!filter.matches(&task("b", "UI ラフ", TaskStatus::Done, None)));
    }

    #[test]
    fn label_filter_never_matches_unlabelled_task() {
        let filter = TaskFilter::label("l1");
        assert!(!filter.matches(&task("a", "x", TaskStatus::Todo, None)));
        assert!(filter.matches(&task("b", "x", TaskStatus::Todo, Some("l1"))));
    }

    #[test]
    fn blank_label_id_is_no_constraint() {
        let filter: TaskFilter = serde_json::from_str(r#"{"q":"","labelId":""}"#).unwrap();
        assert!(filter.is_empty());
        assert!(filter.matches(&task("a", "x", TaskStatus::Todo, None)));
        assert!(filter.matches(&task("b", "x", TaskStatus::Todo, Some("l1"))));
    }

    #[test]
    fn predicates_are_anded() {
        let filter = TaskFilter {
            text_query: Some("ui".to_string()),
            status: Some(TaskStatus::InProgress),
            label_id: Some("l2".to_string()),
        };
        assert!(filter.matches(&task("a", "UI draft", TaskStatus::InProgress, Some("l2"))));
        assert!(!filter.matches(&task("b", "UI draft", TaskStatus::Todo, Some("l2"))));
        assert!(!filter.matches(&task("c", "UI draft", TaskStatus::InProgress, Some("l1"))));
    }

    #[test]
    fn deserializes_short_query_alias() {
        let filter: TaskFilter = serde_json::from_str(r#"{"q":"qa","status":"Done"}"#).unwrap();
        assert_eq!(filter.text_query.as_deref(), Some("qa"));
        assert_eq!(filter.status, Some(TaskStatus::Done));
        assert!(filter.label_id.is_none());
    }

    #[test]
    fn columns_preserve_listing_order() {
        let columns = BoardColumns::from_tasks(vec![
            task("a", "a", TaskStatus::Done, None),
            task("b", "b", TaskStatus::Todo, None),
            task("c", "c", TaskStatus::Done, None),
        ]);
        let done: Vec<_> = columns.column(TaskStatus::Done).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(done, ["a", "c"]);
        assert_eq!(columns.todo.len(), 1);
        assert!(columns.in_progress.is_empty());
        assert_eq!(columns.total(), 3);
    }
}
