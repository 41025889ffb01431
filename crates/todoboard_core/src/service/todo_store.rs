//! Todo store: the ordered todo list and its mutation contract.
//!
//! # Responsibility
//! - Own the in-memory todo sequence.
//! - Apply add/edit/delete/toggle/status operations by position.
//! - Write the full sequence through the persistence port after each change.
//!
//! # Invariants
//! - Validation and index errors reject before any mutation or write.
//! - A failed write never rolls back the applied mutation; it is returned.
//! - Every mutation leaves `completed` consistent with `status`.

use crate::model::todo::{TodoId, TodoItem, TodoStatus, TodoValidationError};
use crate::repo::todo_repo::{PersistenceError, TodoPersistence};
use chrono::NaiveDate;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Position outside `0..len`.
    Index { index: usize, len: usize },
    /// Empty task text or unknown status label.
    InvalidArgument(TodoValidationError),
    /// No item carries this id.
    NotFound(TodoId),
    /// Load failed, or save failed after the mutation was applied.
    Persistence(PersistenceError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index { index, len } => {
                write!(f, "todo index {index} out of range for list of length {len}")
            }
            Self::InvalidArgument(err) => write!(f, "invalid argument: {err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::Index { .. } | Self::NotFound(_) => None,
        }
    }
}

impl From<TodoValidationError> for StoreError {
    fn from(value: TodoValidationError) -> Self {
        Self::InvalidArgument(value)
    }
}

impl From<PersistenceError> for StoreError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

/// Ordered todo list bound to a persistence port.
pub struct TodoStore<P: TodoPersistence> {
    persistence: P,
    items: Vec<TodoItem>,
}

impl<P: TodoPersistence> TodoStore<P> {
    /// Restores the saved sequence and binds the store to `persistence`.
    ///
    /// Items whose `completed` flag disagrees with their status are
    /// reconciled in memory; the slot is rewritten on the next mutation.
    ///
    /// # Errors
    /// - `StoreError::Persistence` when the slot cannot be read or decoded.
    pub fn open(persistence: P) -> StoreResult<Self> {
        let mut items = persistence.load().map_err(|err| {
            error!("event=store_open module=store status=error error={err}");
            err
        })?;

        let reconciled = items
            .iter_mut()
            .map(TodoItem::reconcile_completion)
            .filter(|changed| *changed)
            .count();
        if reconciled > 0 {
            warn!(
                "event=store_open module=store status=reconciled reconciled={}",
                reconciled
            );
        }

        info!(
            "event=store_open module=store status=ok count={}",
            items.len()
        );
        Ok(Self { persistence, items })
    }

    /// Current sequence in display order.
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Current position of the item with `id`.
    pub fn position_of(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Appends a new proposed item and returns its index.
    ///
    /// # Errors
    /// - `InvalidArgument` when `task` is empty; nothing is written.
    /// - `Persistence` when the write fails; the item stays appended.
    pub fn add(&mut self, task: impl Into<String>, date: NaiveDate) -> StoreResult<usize> {
        let item = TodoItem::new(task, date)?;
        self.items.push(item);
        let index = self.items.len() - 1;
        self.commit("todo_add", index)?;
        Ok(index)
    }

    /// Replaces the item at `index` with fresh `task` and `date`.
    ///
    /// `completed` and `status` reset to defaults; the id is kept.
    pub fn edit(
        &mut self,
        index: usize,
        task: impl Into<String>,
        date: NaiveDate,
    ) -> StoreResult<()> {
        self.check_index(index)?;
        let replacement = TodoItem::with_id(self.items[index].id, task, date)?;
        self.items[index] = replacement;
        self.commit("todo_edit", index)
    }

    /// Removes and returns the item at `index`.
    pub fn delete(&mut self, index: usize) -> StoreResult<TodoItem> {
        self.check_index(index)?;
        let removed = self.items.remove(index);
        self.commit("todo_delete", index)?;
        Ok(removed)
    }

    /// Flips `completed`; status moves to `Completed` or `In Progress`.
    ///
    /// Toggling a proposed item twice lands it in `In Progress`, not back in
    /// `Proposed`.
    pub fn toggle_complete(&mut self, index: usize) -> StoreResult<()> {
        self.check_index(index)?;
        let item = &mut self.items[index];
        item.completed = !item.completed;
        item.status = if item.completed {
            TodoStatus::Completed
        } else {
            TodoStatus::InProgress
        };
        self.commit("todo_toggle", index)
    }

    /// Moves the item to `status`; `completed` follows it.
    ///
    /// Any status other than `Completed` clears `completed`, even when the
    /// item was already incomplete.
    pub fn set_status(&mut self, index: usize, status: TodoStatus) -> StoreResult<()> {
        self.check_index(index)?;
        let item = &mut self.items[index];
        item.status = status;
        item.completed = status == TodoStatus::Completed;
        self.commit("todo_set_status", index)
    }

    /// Like `set_status`, parsing a text label first.
    ///
    /// # Errors
    /// - `InvalidArgument` for labels outside the status set.
    pub fn set_status_label(&mut self, index: usize, label: &str) -> StoreResult<()> {
        self.check_index(index)?;
        let status = label.parse::<TodoStatus>()?;
        self.set_status(index, status)
    }

    /// Items in `status`, paired with their position, in sequence order.
    ///
    /// The returned iterator can be cloned to restart it.
    pub fn by_status(
        &self,
        status: TodoStatus,
    ) -> impl Iterator<Item = (usize, &TodoItem)> + Clone + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, item)| item.status == status)
    }

    pub fn edit_by_id(
        &mut self,
        id: TodoId,
        task: impl Into<String>,
        date: NaiveDate,
    ) -> StoreResult<()> {
        let index = self.resolve(id)?;
        self.edit(index, task, date)
    }

    pub fn delete_by_id(&mut self, id: TodoId) -> StoreResult<TodoItem> {
        let index = self.resolve(id)?;
        self.delete(index)
    }

    pub fn toggle_complete_by_id(&mut self, id: TodoId) -> StoreResult<()> {
        let index = self.resolve(id)?;
        self.toggle_complete(index)
    }

    pub fn set_status_by_id(&mut self, id: TodoId, status: TodoStatus) -> StoreResult<()> {
        let index = self.resolve(id)?;
        self.set_status(index, status)
    }

    fn resolve(&self, id: TodoId) -> StoreResult<usize> {
        self.position_of(id).ok_or(StoreError::NotFound(id))
    }

    fn check_index(&self, index: usize) -> StoreResult<()> {
        if index >= self.items.len() {
            return Err(StoreError::Index {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    fn commit(&self, event: &'static str, index: usize) -> StoreResult<()> {
        match self.persistence.save(&self.items) {
            Ok(()) => {
                info!(
                    "event={} module=store status=ok index={} count={}",
                    event,
                    index,
                    self.items.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event={} module=store status=error error_code=save_failed index={} error={}",
                    event, index, err
                );
                Err(err.into())
            }
        }
    }
}
