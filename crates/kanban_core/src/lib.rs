//! Core domain logic for the kanban task board.
//! This crate is the single source of truth for board invariants.

pub mod board;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use board::{open_board, BoardApi};
pub use config::{BackendConfig, BoardConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::comment::{Comment, CommentId};
pub use model::label::{is_hex_color, normalize_hex_color, Label, LabelId};
pub use model::task::{Task, TaskId, TaskStatus};
pub use model::validation::ValidationError;
pub use repo::board_repo::{BoardRepository, RepoError, RepoResult};
pub use repo::memory_repo::InMemoryBoardRepository;
pub use repo::sqlite_repo::SqliteBoardRepository;
pub use seed::seed_demo_board;
pub use service::board_service::BoardService;
pub use service::clock::MonotonicClock;
pub use service::error::{BoardError, BoardErrorKind, BoardResult};
pub use service::query_service::{BoardColumns, TaskFilter, TaskQueryService, COMMENTS_LIMIT};
pub use service::task_service::{
    AddCommentRequest, CreateTaskRequest, DeletedTask, TaskMutationService, UpdateTaskRequest,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
