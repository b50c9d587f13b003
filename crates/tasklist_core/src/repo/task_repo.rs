//! Task repository contract with SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the durable `tasks` collection.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Task::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Mutation failures are returned as recoverable errors; nothing here
//!   terminates the process.

use crate::db::DbError;
use crate::model::task::{Task, TaskId, TaskValidationError};
use rusqlite::{params, Connection, Row};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT uuid, title FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task CRUD operations.
///
/// Deletion policy: removing an absent identity is an error (`NotFound`),
/// not a silent no-op, so stale callers learn their view is out of date.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn rename_task(&self, id: TaskId, title: &str) -> RepoResult<()>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
}

/// SQLite-backed task repository.
///
/// The connection runs in autocommit mode with `synchronous=FULL`, so every
/// mutation below is durable before the method returns.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (uuid, title) VALUES (?1, ?2);",
            params![task.id.to_string(), task.title.as_str()],
        )?;

        Ok(task.id)
    }

    fn rename_task(&self, id: TaskId, title: &str) -> RepoResult<()> {
        if title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle.into());
        }

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![title, id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        // Creation order; no ordering contract is exposed to callers.
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY created_at ASC, uuid ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }
}

/// In-memory task repository keyed by identity.
///
/// Useful for service-level tests and hosts that do not need durability.
/// Shares the SQLite implementation's error semantics.
#[derive(Debug, Default)]
pub struct MemoryTaskRepository {
    tasks: Mutex<BTreeMap<TaskId, Task>>,
}

impl MemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskRepository for MemoryTaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        let mut tasks = lock_tasks(&self.tasks);
        tasks.insert(task.id, task.clone());
        Ok(task.id)
    }

    fn rename_task(&self, id: TaskId, title: &str) -> RepoResult<()> {
        if title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle.into());
        }

        let mut tasks = lock_tasks(&self.tasks);
        let task = tasks.get_mut(&id).ok_or(RepoError::NotFound(id))?;
        task.title = title.to_string();
        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let mut tasks = lock_tasks(&self.tasks);
        if tasks.remove(&id).is_none() {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let tasks = lock_tasks(&self.tasks);
        Ok(tasks.get(&id).cloned())
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let tasks = lock_tasks(&self.tasks);
        Ok(tasks.values().cloned().collect())
    }
}

fn lock_tasks(
    tasks: &Mutex<BTreeMap<TaskId, Task>>,
) -> std::sync::MutexGuard<'_, BTreeMap<TaskId, Task>> {
    // A poisoned lock means a panic mid-insert on another thread; the map
    // itself is still structurally valid, so keep serving.
    tasks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in tasks.uuid"))
    })?;

    let title: String = row.get("title")?;
    let task = Task::with_id(id, title)
        .map_err(|err| RepoError::InvalidData(format!("row for task {id}: {err}")))?;
    Ok(task)
}
