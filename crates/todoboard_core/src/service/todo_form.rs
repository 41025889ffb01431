//! Input row state: task text, picked date and add/update mode.
//!
//! # Invariants
//! - Edit mode targets an item by id, so deletes elsewhere do not retarget it.
//! - Submitting an empty task is a no-op that keeps the form untouched.
//! - A successful submit resets the form to add mode with today's date.

use crate::model::todo::{TodoId, TodoItem};
use crate::repo::todo_repo::TodoPersistence;
use crate::service::todo_store::{StoreError, StoreResult, TodoStore};
use chrono::NaiveDate;

pub const ADD_LABEL: &str = "Add Task";
pub const UPDATE_LABEL: &str = "Update Task";

/// Editable draft backing the add/update row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoForm {
    pub task: String,
    pub date: NaiveDate,
    editing: Option<TodoId>,
    today: NaiveDate,
}

impl TodoForm {
    /// Empty form whose date picker defaults to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            task: String::new(),
            date: today,
            editing: None,
            today,
        }
    }

    /// Id of the item being edited, if any.
    pub fn editing(&self) -> Option<TodoId> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Button label for the current mode.
    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            UPDATE_LABEL
        } else {
            ADD_LABEL
        }
    }

    /// Loads the item at `index` into the form and switches to edit mode.
    pub fn begin_edit<P: TodoPersistence>(
        &mut self,
        store: &TodoStore<P>,
        index: usize,
    ) -> StoreResult<()> {
        let item: &TodoItem = store.get(index).ok_or(StoreError::Index {
            index,
            len: store.len(),
        })?;
        self.task = item.task.clone();
        self.date = item.date;
        self.editing = Some(item.id);
        Ok(())
    }

    /// Leaves edit mode and clears the draft.
    pub fn cancel_edit(&mut self) {
        self.reset();
    }

    /// Adds or updates depending on mode.
    ///
    /// Returns the affected index, or `None` when the task is empty.
    ///
    /// # Errors
    /// - `NotFound` when the edited item was deleted meanwhile.
    /// - Store errors from the underlying add/edit. The form is reset when the
    ///   mutation was applied, even if persisting it failed.
    pub fn submit<P: TodoPersistence>(
        &mut self,
        store: &mut TodoStore<P>,
    ) -> StoreResult<Option<usize>> {
        if self.task.is_empty() {
            return Ok(None);
        }

        let result = match self.editing {
            Some(id) => {
                let index = store.position_of(id).ok_or(StoreError::NotFound(id))?;
                store
                    .edit(index, self.task.clone(), self.date)
                    .map(|()| index)
            }
            None => store.add(self.task.clone(), self.date),
        };

        match result {
            Ok(index) => {
                self.reset();
                Ok(Some(index))
            }
            Err(err @ StoreError::Persistence(_)) => {
                self.reset();
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    fn reset(&mut self) {
        self.task.clear();
        self.date = self.today;
        self.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{TodoForm, ADD_LABEL};
    use chrono::NaiveDate;

    #[test]
    fn new_form_defaults_to_add_mode_today() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let form = TodoForm::new(today);
        assert_eq!(form.date, today);
        assert!(form.task.is_empty());
        assert_eq!(form.submit_label(), ADD_LABEL);
    }
}
