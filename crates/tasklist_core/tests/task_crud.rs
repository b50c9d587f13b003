use tasklist_core::db::{open_db, open_db_in_memory};
use tasklist_core::{RepoError, SqliteTaskRepository, Task, TaskRepository};
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("first task").unwrap();
    let id = repo.create_task(&task).unwrap();

    let loaded = repo.get_task(id).unwrap().unwrap();
    assert_eq!(loaded.id, task.id);
    assert_eq!(loaded.title, "first task");
}

#[test]
fn create_appears_in_list_exactly_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("unique entry").unwrap();
    repo.create_task(&task).unwrap();

    let listed = repo.list_tasks().unwrap();
    let matches: Vec<_> = listed
        .iter()
        .filter(|candidate| candidate.title == "unique entry")
        .collect();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, task.id);
}

#[test]
fn create_rejects_empty_title_and_leaves_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut task = Task::new("placeholder").unwrap();
    task.title = String::new();

    let err = repo.create_task(&task).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.list_tasks().unwrap().is_empty());
}

#[test]
fn rename_replaces_title_under_same_identity() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("draft title").unwrap();
    repo.create_task(&task).unwrap();

    repo.rename_task(task.id, "final title").unwrap();

    let listed = repo.list_tasks().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, task.id);
    assert_eq!(listed[0].title, "final title");
    assert!(!listed.iter().any(|candidate| candidate.title == "draft title"));
}

#[test]
fn rename_rejects_empty_title_and_keeps_old_value() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("keep me").unwrap();
    repo.create_task(&task).unwrap();

    let err = repo.rename_task(task.id, "  ").unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let loaded = repo.get_task(task.id).unwrap().unwrap();
    assert_eq!(loaded.title, "keep me");
}

#[test]
fn rename_unknown_identity_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let ghost = Uuid::new_v4();
    let err = repo.rename_task(ghost, "anything").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == ghost));
}

#[test]
fn delete_removes_identity_from_list() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let keep = Task::new("keep").unwrap();
    let gone = Task::new("gone").unwrap();
    repo.create_task(&keep).unwrap();
    repo.create_task(&gone).unwrap();

    repo.delete_task(gone.id).unwrap();

    let listed = repo.list_tasks().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, keep.id);
    assert!(repo.get_task(gone.id).unwrap().is_none());
}

#[test]
fn delete_unknown_identity_returns_not_found_and_keeps_store() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("survivor").unwrap();
    repo.create_task(&task).unwrap();

    let ghost = Uuid::new_v4();
    let err = repo.delete_task(ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == ghost));

    // Double delete of a real task is also a NotFound the second time.
    repo.delete_task(task.id).unwrap();
    let err = repo.delete_task(task.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == task.id));
}

#[test]
fn list_preserves_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task_a = task_with_fixed_id("00000000-0000-4000-8000-000000000001", "a");
    let task_b = task_with_fixed_id("00000000-0000-4000-8000-000000000002", "b");
    let task_c = task_with_fixed_id("00000000-0000-4000-8000-000000000003", "c");
    repo.create_task(&task_a).unwrap();
    repo.create_task(&task_b).unwrap();
    repo.create_task(&task_c).unwrap();

    // Force identical timestamps so the uuid tie-break decides.
    conn.execute("UPDATE tasks SET created_at = 1234567890000;", [])
        .unwrap();

    let listed = repo.list_tasks().unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].id, task_a.id);
    assert_eq!(listed[1].id, task_b.id);
    assert_eq!(listed[2].id, task_c.id);
}

#[test]
fn mutations_are_durable_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasklist.db");

    let created = {
        let conn = open_db(&path).unwrap();
        let repo = SqliteTaskRepository::new(&conn);
        repo.create_task(&Task::new("persisted").unwrap()).unwrap()
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let loaded = repo.get_task(created).unwrap().unwrap();
    assert_eq!(loaded.title, "persisted");
}

#[test]
fn read_path_rejects_corrupt_identity() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (uuid, title) VALUES ('not-a-uuid', 'broken');",
        [],
    )
    .unwrap();

    let repo = SqliteTaskRepository::new(&conn);
    let err = repo.list_tasks().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

fn task_with_fixed_id(id: &str, title: &str) -> Task {
    Task::with_id(Uuid::parse_str(id).unwrap(), title).unwrap()
}
