//! Task domain model.
//!
//! # Responsibility
//! - Define the single persisted entity: an identity plus a title.
//! - Validate titles before they reach persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is non-empty after trimming.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Validation failures for in-memory task state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Identity is the nil UUID.
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::NilId => write!(f, "task id must not be the nil uuid"),
        }
    }
}

impl Error for TaskValidationError {}

/// The sole persisted entity: a record with an identity and a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID assigned at creation and never reused.
    pub id: TaskId,
    /// User-visible title. Non-empty; mutable through rename.
    pub title: String,
}

impl Task {
    /// Creates a new task with a generated stable ID.
    ///
    /// # Errors
    /// - `EmptyTitle` when the title is empty or whitespace-only.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by read paths and tests where identity already exists.
    ///
    /// # Errors
    /// - `NilId` when `id` is the nil UUID.
    /// - `EmptyTitle` when the title is empty or whitespace-only.
    pub fn with_id(id: TaskId, title: impl Into<String>) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            title: title.into(),
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks model invariants without touching storage.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }
}
