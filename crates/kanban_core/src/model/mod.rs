//! Board domain model for tasks, comments and labels.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep field naming aligned with the presentation-layer wire shape.
//!
//! # Invariants
//! - Every entity is identified by an opaque, stable string id.
//! - Tasks reference labels, and comments reference tasks, by id only.
//!   No referential integrity is implied by the model.

pub mod comment;
pub mod label;
pub mod task;
pub mod validation;
