//! Interface-boundary error taxonomy for board operations.
//!
//! # Invariants
//! - `Conflict` is only produced by a version mismatch on update.
//! - `Unavailable` covers every failure that is not the caller's fault.

use crate::model::task::TaskId;
use crate::model::validation::ValidationError;
use crate::repo::board_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardResult<T> = Result<T, BoardError>;

/// Coarse error class surfaced to presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardErrorKind {
    Validation,
    NotFound,
    /// Stale version; re-fetch and retry.
    Conflict,
    Unavailable,
}

impl BoardErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Unavailable => "unavailable",
        }
    }

    /// HTTP-style status code for networked callers.
    pub fn status_code(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Unavailable => 500,
        }
    }
}

/// Error returned by every board operation.
#[derive(Debug)]
pub enum BoardError {
    /// Malformed or missing required input.
    Validation(ValidationError),
    /// Referenced entity does not exist.
    NotFound { entity: &'static str, id: String },
    /// Caller's observed version differs from the stored one.
    Conflict {
        id: TaskId,
        expected: u64,
        actual: u64,
    },
    /// Store failure unrelated to request content.
    Unavailable(RepoError),
}

impl BoardError {
    pub fn kind(&self) -> BoardErrorKind {
        match self {
            Self::Validation(_) => BoardErrorKind::Validation,
            Self::NotFound { .. } => BoardErrorKind::NotFound,
            Self::Conflict { .. } => BoardErrorKind::Conflict,
            Self::Unavailable(_) => BoardErrorKind::Unavailable,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    pub fn is_conflict(&self) -> bool {
        self.kind() == BoardErrorKind::Conflict
    }

    pub(crate) fn task_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "task",
            id: id.into(),
        }
    }
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Conflict {
                id,
                expected,
                actual,
            } => write!(
                f,
                "conflict on task {id}: expected version {expected}, found {actual}"
            ),
            Self::Unavailable(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Unavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for BoardError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for BoardError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::TaskNotFound(id) => Self::task_not_found(id),
            RepoError::VersionMismatch {
                id,
                expected,
                actual,
            } => Self::Conflict {
                id,
                expected,
                actual,
            },
            other => Self::Unavailable(other),
        }
    }
}
