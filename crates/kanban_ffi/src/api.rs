//! FFI use-case API for UI-host calls.
//!
//! # Responsibility
//! - Expose the board request/response operations to Dart via FRB.
//! - Flatten core results into envelopes a UI can branch on.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures carry `error_kind` (`validation|not_found|conflict|unavailable`)
//!   and an HTTP-style `status_code`, so a UI can route `conflict` (409) to a
//!   re-fetch-and-retry flow instead of a generic error toast.
//! - The board is constructed once per process by `board_init`.

use kanban_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_board,
    ping as ping_inner, AddCommentRequest, BoardApi, BoardConfig, BoardError, BoardErrorKind,
    Comment, CreateTaskRequest, Label, Task, TaskFilter, TaskStatus, UpdateTaskRequest,
};
use log::warn;
use std::sync::OnceLock;

struct ActiveBoard {
    config: BoardConfig,
    board: Box<dyn BoardApi>,
}

static ACTIVE_BOARD: OnceLock<ActiveBoard> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Returns empty string on success and error message on failure.
/// - Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens the board backend described by `config_json`.
///
/// Input semantics:
/// - `config_json`: `{"backend":{"kind":"memory"|"sqlite","path":...},"seed_demo_data":bool}`.
///   Blank input selects an unseeded in-memory board.
///
/// # FFI contract
/// - Returns empty string on success and error message on failure.
/// - Idempotent for the same configuration; a different configuration after
///   a successful init is rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn board_init(config_json: String) -> String {
    match init_board(config_json.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Wire shape of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// `Todo|InProgress|Done`.
    pub status: String,
    pub label_id: Option<String>,
    pub attachment_url: Option<String>,
    pub version: u64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Wire shape of one comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentItem {
    pub id: String,
    pub task_id: String,
    pub body: String,
    pub created_at: i64,
}

/// Wire shape of one label, with a readable foreground color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelItem {
    pub id: String,
    pub name: String,
    pub color: String,
    pub foreground: String,
}

/// Failure details shared by every envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardFailure {
    pub error_kind: String,
    pub status_code: u16,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResponse {
    pub task: Option<TaskItem>,
    pub error: Option<BoardFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub items: Vec<TaskItem>,
    pub error: Option<BoardFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTaskResponse {
    pub id: Option<String>,
    pub error: Option<BoardFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelListResponse {
    pub items: Vec<LabelItem>,
    pub error: Option<BoardFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentResponse {
    pub comment: Option<CommentItem>,
    pub error: Option<BoardFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentListResponse {
    pub items: Vec<CommentItem>,
    pub error: Option<BoardFailure>,
}

/// Lists tasks. `None` or blank arguments impose no constraint.
#[flutter_rust_bridge::frb(sync)]
pub fn list_tasks(
    query: Option<String>,
    status: Option<String>,
    label_id: Option<String>,
) -> TaskListResponse {
    let result = parse_status(status).and_then(|status| {
        let filter = TaskFilter {
            text_query: query,
            status,
            label_id: label_id.filter(|value| !value.trim().is_empty()),
        };
        with_board(|board| board.list_tasks(&filter))
    });
    match result {
        Ok(tasks) => TaskListResponse {
            items: tasks.into_iter().map(to_task_item).collect(),
            error: None,
        },
        Err(failure) => TaskListResponse {
            items: Vec::new(),
            error: Some(failure),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn get_task(id: String) -> TaskResponse {
    task_response(with_board(|board| board.get_task(id.as_str())))
}

/// Creates a task in `Todo` at version 0.
#[flutter_rust_bridge::frb(sync)]
pub fn create_task(
    title: String,
    description: Option<String>,
    label_id: Option<String>,
) -> TaskResponse {
    let request = CreateTaskRequest {
        title,
        description,
        label_id,
    };
    task_response(with_board(|board| board.create_task(request)))
}

/// Updates a task guarded by the caller's last observed `version`.
///
/// Input semantics:
/// - `None` leaves a field unchanged.
/// - An empty string clears `description`, `label_id` or `attachment_url`.
/// - A stale `version` fails with `error_kind = "conflict"`; re-fetch with
///   `get_task` and retry.
#[flutter_rust_bridge::frb(sync)]
pub fn update_task(
    id: String,
    version: u64,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    label_id: Option<String>,
    attachment_url: Option<String>,
) -> TaskResponse {
    let result = parse_status(status).and_then(|status| {
        let request = UpdateTaskRequest {
            id,
            version,
            title,
            description: description.map(Some),
            status,
            label_id: label_id.map(Some),
            attachment_url: attachment_url.map(Some),
        };
        with_board(|board| board.update_task(request))
    });
    task_response(result)
}

/// Deletes a task and its comments. Unknown ids still succeed.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_task(id: String) -> DeleteTaskResponse {
    match with_board(|board| board.delete_task(id.as_str())) {
        Ok(deleted) => DeleteTaskResponse {
            id: Some(deleted.id),
            error: None,
        },
        Err(failure) => DeleteTaskResponse {
            id: None,
            error: Some(failure),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_labels() -> LabelListResponse {
    match with_board(|board| board.list_labels()) {
        Ok(labels) => LabelListResponse {
            items: labels.into_iter().map(to_label_item).collect(),
            error: None,
        },
        Err(failure) => LabelListResponse {
            items: Vec::new(),
            error: Some(failure),
        },
    }
}

/// Lists up to 10 comments for a task, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn list_comments(task_id: String) -> CommentListResponse {
    match with_board(|board| board.list_comments(task_id.as_str())) {
        Ok(comments) => CommentListResponse {
            items: comments.into_iter().map(to_comment_item).collect(),
            error: None,
        },
        Err(failure) => CommentListResponse {
            items: Vec::new(),
            error: Some(failure),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn add_comment(task_id: String, body: String) -> CommentResponse {
    match with_board(|board| board.add_comment(AddCommentRequest::new(task_id, body))) {
        Ok(comment) => CommentResponse {
            comment: Some(to_comment_item(comment)),
            error: None,
        },
        Err(failure) => CommentResponse {
            comment: None,
            error: Some(failure),
        },
    }
}

fn init_board(config_json: &str) -> Result<(), String> {
    let config = BoardConfig::from_json(config_json).map_err(|err| err.to_string())?;

    if ACTIVE_BOARD.get().is_none() {
        let board = open_board(&config).map_err(|err| format!("board_init failed: {err}"))?;
        // A concurrent init may win the race; the config check below covers it.
        let _ = ACTIVE_BOARD.set(ActiveBoard {
            config: config.clone(),
            board,
        });
    }

    match ACTIVE_BOARD.get() {
        Some(active) if active.config == config => Ok(()),
        Some(_) => Err("board already initialized with a different config".to_string()),
        None => Err("board_init failed: board not available".to_string()),
    }
}

fn with_board<T>(
    f: impl FnOnce(&dyn BoardApi) -> Result<T, BoardError>,
) -> Result<T, BoardFailure> {
    let active = ACTIVE_BOARD.get().ok_or_else(|| BoardFailure {
        error_kind: BoardErrorKind::Unavailable.as_str().to_string(),
        status_code: BoardErrorKind::Unavailable.status_code(),
        message: "board not initialized; call board_init first".to_string(),
    })?;
    f(active.board.as_ref()).map_err(|err| to_failure(&err))
}

fn parse_status(status: Option<String>) -> Result<Option<TaskStatus>, BoardFailure> {
    match status.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => TaskStatus::parse(value).map(Some).ok_or_else(|| BoardFailure {
            error_kind: BoardErrorKind::Validation.as_str().to_string(),
            status_code: BoardErrorKind::Validation.status_code(),
            message: format!("unknown task status `{value}`; expected Todo|InProgress|Done"),
        }),
    }
}

fn to_failure(err: &BoardError) -> BoardFailure {
    if err.kind() == BoardErrorKind::Unavailable {
        warn!("event=ffi_call module=ffi status=error error_kind=unavailable error={err}");
    }
    BoardFailure {
        error_kind: err.kind().as_str().to_string(),
        status_code: err.status_code(),
        message: err.to_string(),
    }
}

fn task_response(result: Result<Task, BoardFailure>) -> TaskResponse {
    match result {
        Ok(task) => TaskResponse {
            task: Some(to_task_item(task)),
            error: None,
        },
        Err(failure) => TaskResponse {
            task: None,
            error: Some(failure),
        },
    }
}

fn to_task_item(task: Task) -> TaskItem {
    TaskItem {
        id: task.id,
        title: task.title,
        description: task.description,
        status: task.status.as_str().to_string(),
        label_id: task.label_id,
        attachment_url: task.attachment_url,
        version: task.version,
        created_at: task.created_at,
        updated_at: task.updated_at,
    }
}

fn to_comment_item(comment: Comment) -> CommentItem {
    CommentItem {
        id: comment.id,
        task_id: comment.task_id,
        body: comment.body,
        created_at: comment.created_at,
    }
}

fn to_label_item(label: Label) -> LabelItem {
    let foreground = label.contrast_color().to_string();
    LabelItem {
        id: label.id,
        name: label.name,
        color: label.color,
        foreground,
    }
}
