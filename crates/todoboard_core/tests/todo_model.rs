use chrono::NaiveDate;
use todoboard_core::{TodoItem, TodoStatus, TodoValidationError};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn new_item_sets_defaults() {
    let item = TodoItem::new("Buy milk", date(2024, 5, 1)).unwrap();

    assert!(!item.id.is_nil());
    assert_eq!(item.task, "Buy milk");
    assert_eq!(item.date, date(2024, 5, 1));
    assert!(!item.completed);
    assert_eq!(item.status, TodoStatus::Proposed);
    assert!(item.is_consistent());
}

#[test]
fn new_item_rejects_empty_task() {
    let err = TodoItem::new("", date(2024, 5, 1)).unwrap_err();
    assert_eq!(err, TodoValidationError::EmptyTask);
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut item = TodoItem::with_id(id, "Ship release", date(2024, 5, 1)).unwrap();
    item.status = TodoStatus::InProgress;

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["task"], "Ship release");
    assert_eq!(json["date"], "2024-05-01");
    assert_eq!(json["completed"], false);
    assert_eq!(json["status"], "In Progress");

    let decoded: TodoItem = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn deserialize_accepts_payload_without_id_and_with_timestamp_date() {
    let value = serde_json::json!({
        "task": "Legacy",
        "date": "2024-05-01T12:00:00.000Z",
        "completed": true,
        "status": "Completed"
    });

    let item: TodoItem = serde_json::from_value(value).unwrap();
    assert!(!item.id.is_nil());
    assert_eq!(item.status, TodoStatus::Completed);
    assert!(item.completed);
    let drift = (item.date - date(2024, 5, 1)).num_days().abs();
    assert!(drift <= 1, "unexpected local date {}", item.date);
}

#[test]
fn deserialize_rejects_empty_task() {
    let value = serde_json::json!({
        "task": "",
        "date": "2024-05-01",
        "completed": false,
        "status": "Proposed"
    });

    let err = serde_json::from_value::<TodoItem>(value).unwrap_err();
    assert!(
        err.to_string().contains("task must not be empty"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_rejects_unknown_status_and_bad_date() {
    let bad_status = serde_json::json!({
        "task": "x",
        "date": "2024-05-01",
        "completed": false,
        "status": "Archived"
    });
    assert!(serde_json::from_value::<TodoItem>(bad_status).is_err());

    let bad_date = serde_json::json!({
        "task": "x",
        "date": "first of may",
        "completed": false,
        "status": "Proposed"
    });
    let err = serde_json::from_value::<TodoItem>(bad_date).unwrap_err();
    assert!(err.to_string().contains("invalid date"), "unexpected error: {err}");
}

#[test]
fn reconcile_completion_follows_status() {
    let mut item = TodoItem::new("x", date(2024, 5, 1)).unwrap();
    item.status = TodoStatus::Completed;
    assert!(!item.is_consistent());

    assert!(item.reconcile_completion());
    assert!(item.completed);
    assert!(!item.reconcile_completion());
}
