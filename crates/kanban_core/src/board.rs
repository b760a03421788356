//! Board capability set and backend selection.
//!
//! # Responsibility
//! - Define the request/response operations a presentation layer may call.
//! - Construct exactly one backend from explicit configuration.
//!
//! # Invariants
//! - Backend choice is made once, from `BoardConfig`, never from ambient
//!   environment state.
//! - `Conflict` stays distinguishable from every other failure.

use crate::config::{BackendConfig, BoardConfig};
use crate::db::{open_db, open_db_in_memory};
use crate::model::comment::Comment;
use crate::model::label::Label;
use crate::model::task::Task;
use crate::repo::board_repo::RepoError;
use crate::repo::memory_repo::InMemoryBoardRepository;
use crate::repo::sqlite_repo::SqliteBoardRepository;
use crate::seed::seed_demo_board;
use crate::service::board_service::BoardService;
use crate::service::error::{BoardError, BoardResult};
use crate::service::query_service::{BoardColumns, TaskFilter};
use crate::service::task_service::{
    AddCommentRequest, CreateTaskRequest, DeletedTask, UpdateTaskRequest,
};
use log::info;

/// Operations exposed to presentation layers. Each call is one
/// request/response unit with no partial-progress state.
pub trait BoardApi: Send + Sync {
    fn list_tasks(&self, filter: &TaskFilter) -> BoardResult<Vec<Task>>;
    fn get_task(&self, id: &str) -> BoardResult<Task>;
    fn create_task(&self, request: CreateTaskRequest) -> BoardResult<Task>;
    fn update_task(&self, request: UpdateTaskRequest) -> BoardResult<Task>;
    fn delete_task(&self, id: &str) -> BoardResult<DeletedTask>;
    fn list_labels(&self) -> BoardResult<Vec<Label>>;
    fn list_comments(&self, task_id: &str) -> BoardResult<Vec<Comment>>;
    fn add_comment(&self, request: AddCommentRequest) -> BoardResult<Comment>;

    /// Filtered listing grouped into status columns.
    fn board_columns(&self, filter: &TaskFilter) -> BoardResult<BoardColumns> {
        Ok(BoardColumns::from_tasks(self.list_tasks(filter)?))
    }
}

/// Builds the configured backend, seeding demo data when requested.
///
/// # Errors
/// - `Unavailable` when the SQLite backend cannot be opened or migrated,
///   or when seeding collides with existing rows.
pub fn open_board(config: &BoardConfig) -> BoardResult<Box<dyn BoardApi>> {
    let board: Box<dyn BoardApi> = match &config.backend {
        BackendConfig::Memory => {
            let service = BoardService::new(InMemoryBoardRepository::new());
            if config.seed_demo_data {
                seed_demo_board(service.repo(), service.clock())?;
            }
            Box::new(service)
        }
        BackendConfig::Sqlite { path } => {
            let conn = match path {
                Some(path) => open_db(path),
                None => open_db_in_memory(),
            }
            .map_err(|err| BoardError::Unavailable(RepoError::Db(err)))?;
            let service = BoardService::new(SqliteBoardRepository::try_new(conn)?);
            if config.seed_demo_data {
                seed_demo_board(service.repo(), service.clock())?;
            }
            Box::new(service)
        }
    };

    info!(
        "event=board_open module=board status=ok backend={} seeded={}",
        config.backend.kind_name(),
        config.seed_demo_data
    );
    Ok(board)
}
