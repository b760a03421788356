//! Model-level validation errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Malformed or missing required input on a board entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title is blank after trim.
    EmptyTitle,
    /// Comment body is blank after trim.
    EmptyCommentBody,
    /// Label name is blank after trim.
    EmptyLabelName,
    /// Label color is not 3 or 6 hex digits.
    InvalidLabelColor(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be blank"),
            Self::EmptyCommentBody => write!(f, "comment body must not be blank"),
            Self::EmptyLabelName => write!(f, "label name must not be blank"),
            Self::InvalidLabelColor(value) => write!(
                f,
                "label color `{value}` is invalid (expected 3 or 6 hex digits, optional `#`)"
            ),
        }
    }
}

impl Error for ValidationError {}
