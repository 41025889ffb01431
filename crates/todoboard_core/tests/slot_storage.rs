use chrono::NaiveDate;
use rusqlite::Connection;
use todoboard_core::db::migrations::latest_version;
use todoboard_core::db::{open_db, open_db_in_memory, DbError};
use todoboard_core::{
    KeyValueSlots, RepoError, SlotTodoPersistence, SqliteSlotRepository, TodoPersistence,
    TodoStatus, TodoStore,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert!(SqliteSlotRepository::try_new(&conn).is_ok());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn open_db_creates_missing_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("board.sqlite3");

    let conn = open_db(&path).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert!(path.exists());
}

#[test]
fn slot_write_overwrites_previous_value() {
    let conn = open_db_in_memory().unwrap();
    let slots = SqliteSlotRepository::try_new(&conn).unwrap();

    assert_eq!(slots.read_slot("todos").unwrap(), None);
    slots.write_slot("todos", "[1]").unwrap();
    slots.write_slot("todos", "[2]").unwrap();
    slots.write_slot("other", "x").unwrap();

    assert_eq!(slots.read_slot("todos").unwrap().as_deref(), Some("[2]"));
    assert_eq!(slots.read_slot("other").unwrap().as_deref(), Some("x"));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteSlotRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_slots_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteSlotRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("kv_slots"))
    ));
}

#[test]
fn repository_rejects_slots_table_missing_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE kv_slots (
            slot_key TEXT PRIMARY KEY NOT NULL,
            slot_value TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteSlotRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "kv_slots",
            column: "updated_at"
        })
    ));
}

#[test]
fn store_state_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.sqlite3");

    let saved = {
        let conn = open_db(&path).unwrap();
        let slots = SqliteSlotRepository::try_new(&conn).unwrap();
        let mut store = TodoStore::open(SlotTodoPersistence::new(slots)).unwrap();
        store.add("Buy milk", date(2024, 5, 1)).unwrap();
        store.add("Walk dog", date(2024, 5, 2)).unwrap();
        store.set_status(1, TodoStatus::Completed).unwrap();
        store.items().to_vec()
    };

    let conn = open_db(&path).unwrap();
    let slots = SqliteSlotRepository::try_new(&conn).unwrap();
    let store = TodoStore::open(SlotTodoPersistence::new(slots)).unwrap();
    assert_eq!(store.items(), saved.as_slice());
}

#[test]
fn custom_slot_key_is_isolated_from_default() {
    let conn = open_db_in_memory().unwrap();
    let slots = SqliteSlotRepository::try_new(&conn).unwrap();

    let work = SlotTodoPersistence::with_key(&slots, "work");
    let mut store = TodoStore::open(work).unwrap();
    store.add("Review PR", date(2024, 5, 1)).unwrap();

    assert_eq!(store.persistence().key(), "work");
    assert!(SlotTodoPersistence::new(&slots).load().unwrap().is_empty());
    assert!(slots.read_slot("work").unwrap().is_some());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
