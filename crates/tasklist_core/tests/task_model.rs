use tasklist_core::{Task, TaskValidationError};
use uuid::Uuid;

#[test]
fn task_new_assigns_fresh_identity() {
    let task = Task::new("buy milk").unwrap();

    assert!(!task.id.is_nil());
    assert_eq!(task.title, "buy milk");

    let other = Task::new("buy milk").unwrap();
    assert_ne!(task.id, other.id);
}

#[test]
fn task_new_rejects_empty_and_whitespace_titles() {
    let err = Task::new("").unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);

    let err = Task::new("   \t").unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Task::with_id(Uuid::nil(), "valid title").unwrap_err();
    assert_eq!(err, TaskValidationError::NilId);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let task = Task::with_id(task_id, "walk the dog").unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], task_id.to_string());
    assert_eq!(json["title"], "walk the dog");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}
