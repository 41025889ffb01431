//! Todo persistence port and its slot-backed implementation.
//!
//! # Responsibility
//! - Define the `load`/`save` contract the store is built against.
//! - Encode the whole todo sequence as JSON into one named slot.
//!
//! # Invariants
//! - `save` always writes the full sequence; there are no partial writes.
//! - A missing slot loads as an empty sequence.
//! - A present but undecodable slot is an error, never an empty list.

use crate::model::todo::TodoItem;
use crate::repo::slot_repo::{KeyValueSlots, RepoError};
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key used when none is configured.
pub const DEFAULT_SLOT_KEY: &str = "todos";

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Failure while reading or writing the persisted todo sequence.
#[derive(Debug)]
pub enum PersistenceError {
    /// Underlying slot storage failed.
    Storage(RepoError),
    /// Sequence could not be encoded.
    Encode(serde_json::Error),
    /// Slot content is not a valid todo sequence.
    Decode {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "todo slot storage failed: {err}"),
            Self::Encode(err) => write!(f, "failed to encode todos: {err}"),
            Self::Decode { key, source } => {
                write!(f, "slot `{key}` does not hold a valid todo list: {source}")
            }
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

impl From<RepoError> for PersistenceError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Persistence port for the todo store.
pub trait TodoPersistence {
    /// Loads the saved sequence, or an empty one when nothing was saved.
    fn load(&self) -> PersistenceResult<Vec<TodoItem>>;
    /// Overwrites the saved sequence.
    fn save(&self, items: &[TodoItem]) -> PersistenceResult<()>;
}

/// Stores the todo sequence as a JSON array in one key/value slot.
pub struct SlotTodoPersistence<S: KeyValueSlots> {
    slots: S,
    key: String,
}

impl<S: KeyValueSlots> SlotTodoPersistence<S> {
    /// Uses the default `todos` slot.
    pub fn new(slots: S) -> Self {
        Self::with_key(slots, DEFAULT_SLOT_KEY)
    }

    pub fn with_key(slots: S, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }
}

impl<S: KeyValueSlots> TodoPersistence for SlotTodoPersistence<S> {
    fn load(&self) -> PersistenceResult<Vec<TodoItem>> {
        let Some(raw) = self.slots.read_slot(&self.key)? else {
            debug!("event=todos_load module=repo status=empty");
            return Ok(Vec::new());
        };

        let items = decode_todos(&raw).map_err(|source| {
            error!(
                "event=todos_load module=repo status=error error_code=decode_failed bytes={}",
                raw.len()
            );
            PersistenceError::Decode {
                key: self.key.clone(),
                source,
            }
        })?;
        debug!(
            "event=todos_load module=repo status=ok count={}",
            items.len()
        );
        Ok(items)
    }

    fn save(&self, items: &[TodoItem]) -> PersistenceResult<()> {
        let encoded = encode_todos(items).map_err(PersistenceError::Encode)?;
        self.slots.write_slot(&self.key, &encoded)?;
        debug!(
            "event=todos_save module=repo status=ok count={} bytes={}",
            items.len(),
            encoded.len()
        );
        Ok(())
    }
}

/// Encodes a todo sequence into its slot payload.
pub fn encode_todos(items: &[TodoItem]) -> serde_json::Result<String> {
    serde_json::to_string(items)
}

/// Decodes a slot payload into a todo sequence.
pub fn decode_todos(raw: &str) -> serde_json::Result<Vec<TodoItem>> {
    serde_json::from_str(raw)
}
