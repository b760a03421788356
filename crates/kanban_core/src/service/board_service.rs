//! Board facade: one store, one clock, both services.

use crate::board::BoardApi;
use crate::model::comment::Comment;
use crate::model::label::Label;
use crate::model::task::Task;
use crate::repo::board_repo::BoardRepository;
use crate::service::clock::MonotonicClock;
use crate::service::error::BoardResult;
use crate::service::query_service::{TaskFilter, TaskQueryService};
use crate::service::task_service::{
    AddCommentRequest, CreateTaskRequest, DeletedTask, TaskMutationService, UpdateTaskRequest,
};

/// Owns a repository and hands out the query and mutation services over it.
pub struct BoardService<R: BoardRepository> {
    repo: R,
    clock: MonotonicClock,
}

impl<R: BoardRepository> BoardService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            clock: MonotonicClock::new(),
        }
    }

    pub fn queries(&self) -> TaskQueryService<'_, R> {
        TaskQueryService::new(&self.repo)
    }

    pub fn mutations(&self) -> TaskMutationService<'_, R> {
        TaskMutationService::new(&self.repo, &self.clock)
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn clock(&self) -> &MonotonicClock {
        &self.clock
    }
}

impl<R: BoardRepository + Send + Sync> BoardApi for BoardService<R> {
    fn list_tasks(&self, filter: &TaskFilter) -> BoardResult<Vec<Task>> {
        self.queries().list_tasks(filter)
    }

    fn get_task(&self, id: &str) -> BoardResult<Task> {
        self.queries().get_task(id)
    }

    fn create_task(&self, request: CreateTaskRequest) -> BoardResult<Task> {
        self.mutations().create_task(request)
    }

    fn update_task(&self, request: UpdateTaskRequest) -> BoardResult<Task> {
        self.mutations().update_task(request)
    }

    fn delete_task(&self, id: &str) -> BoardResult<DeletedTask> {
        self.mutations().delete_task(id)
    }

    fn list_labels(&self) -> BoardResult<Vec<Label>> {
        self.queries().list_labels()
    }

    fn list_comments(&self, task_id: &str) -> BoardResult<Vec<Comment>> {
        self.queries().list_comments(task_id)
    }

    fn add_comment(&self, request: AddCommentRequest) -> BoardResult<Comment> {
        self.mutations().add_comment(request)
    }
}
