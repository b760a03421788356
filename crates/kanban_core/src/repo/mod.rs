//! Entity Store: repository contracts and implementations.
//!
//! # Responsibility
//! - Hold the authoritative task, comment and label collections.
//! - Expose only atomic operations; no partial mutation is ever visible.
//!
//! # Invariants
//! - Write paths validate entities before mutating anything.
//! - `replace_task` is a compare-and-swap on `version`.
//! - `remove_task` cascades to the task's comments in the same atomic step.

pub mod board_repo;
pub mod memory_repo;
pub mod sqlite_repo;
