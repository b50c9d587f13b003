//! Task store use-case service.
//!
//! # Responsibility
//! - Provide the stable create/rename/delete/list entry points callers use.
//! - Delegate persistence to an injected repository implementation.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - The service layer remains storage-agnostic; hosts construct exactly one
//!   instance and pass it to whatever consumes it (no ambient global).

use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use log::info;

/// Use-case facade over the task collection.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new task with the given title and returns the stored value.
    ///
    /// # Contract
    /// - A fresh identity is assigned; the change is committed before return.
    /// - Empty/whitespace-only titles fail with a validation error.
    pub fn create(&self, title: impl Into<String>) -> RepoResult<Task> {
        let task = Task::new(title)?;
        self.repo.create_task(&task)?;
        info!("event=task_create module=service status=ok id={}", task.id);
        Ok(task)
    }

    /// Renames the identified task in place.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn rename(&self, id: TaskId, title: &str) -> RepoResult<()> {
        self.repo.rename_task(id, title)?;
        info!("event=task_rename module=service status=ok id={id}");
        Ok(())
    }

    /// Removes the identified task permanently.
    pub fn delete(&self, id: TaskId) -> RepoResult<()> {
        self.repo.delete_task(id)?;
        info!("event=task_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Gets one task by identity.
    pub fn get(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(id)
    }

    /// Lists every currently stored task.
    pub fn list_all(&self) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks()
    }
}
