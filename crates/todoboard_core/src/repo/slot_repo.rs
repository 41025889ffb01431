//! Key/value slot contracts with SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Provide read/overwrite access to named text slots.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `write_slot` replaces any previous value for the key.
//! - SQLite repositories only accept fully migrated connections.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const SLOTS_TABLE: &str = "kv_slots";
const SLOTS_REQUIRED_COLUMNS: &[&str] = &["slot_key", "slot_value", "updated_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for slot storage operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
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

/// Named text slots, the local-storage equivalent.
pub trait KeyValueSlots {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>>;
    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()>;
}

impl<T: KeyValueSlots + ?Sized> KeyValueSlots for &T {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write_slot(key, value)
    }
}

/// SQLite-backed slots over the `kv_slots` table.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    /// Wraps a connection after checking it was bootstrapped by `db::open_db`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is not the latest.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        ensure_slots_schema(conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueSlots for SqliteSlotRepository<'_> {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT slot_value FROM kv_slots WHERE slot_key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (slot_key, slot_value)
             VALUES (?1, ?2)
             ON CONFLICT(slot_key) DO UPDATE SET
                slot_value = excluded.slot_value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

fn ensure_slots_schema(conn: &Connection) -> RepoResult<()> {
    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [SLOTS_TABLE],
        |row| row.get(0),
    )?;
    if table_exists != 1 {
        return Err(RepoError::MissingRequiredTable(SLOTS_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([SLOTS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    for &column in SLOTS_REQUIRED_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: SLOTS_TABLE,
                column,
            });
        }
    }
    Ok(())
}

/// Process-local slots for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySlots {
    values: RefCell<HashMap<String, String>>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates slots pre-populated with one value.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let slots = Self::default();
        slots.values.borrow_mut().insert(key.into(), value.into());
        slots
    }
}

impl KeyValueSlots for MemorySlots {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
