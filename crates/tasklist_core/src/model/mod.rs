//! Domain model for the task collection.
//!
//! # Responsibility
//! - Define the canonical `Task` record used by core business logic.
//!
//! # Invariants
//! - Every domain object is identified by a stable `TaskId`.
//! - Titles are validated before any object leaves this module.

pub mod task;
