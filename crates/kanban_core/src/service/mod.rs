//! Board use-case services.
//!
//! # Responsibility
//! - `query_service`: read-only derivation of filtered, ordered views.
//! - `task_service`: the optimistic-concurrency mutation protocol.
//! - `board_service`: owns one store and exposes both through `BoardApi`.
//!
//! # Invariants
//! - Services never bypass repository atomicity contracts.
//! - Only the mutation service writes to the store.

pub mod board_service;
pub mod clock;
pub mod error;
pub mod query_service;
pub mod task_service;
