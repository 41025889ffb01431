//! Column projection of the todo list for rendering.
//!
//! # Responsibility
//! - Split the sequence into one column per status, in fixed column order.
//! - Carry each card's store position so UI actions address the right item.

use crate::model::todo::{TodoId, TodoStatus};
use crate::repo::todo_repo::TodoPersistence;
use crate::service::todo_store::TodoStore;
use chrono::{Datelike, NaiveDate};

/// One rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoCard {
    /// Position in the store sequence, not within the column.
    pub index: usize,
    pub id: TodoId,
    pub task: String,
    /// Long-form due date, e.g. `May 1st, 2024`.
    pub due_label: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    pub status: TodoStatus,
    pub cards: Vec<TodoCard>,
}

impl BoardColumn {
    pub fn title(&self) -> &'static str {
        self.status.label()
    }
}

/// Builds the Proposed / In Progress / Completed columns.
pub fn board<P: TodoPersistence>(store: &TodoStore<P>) -> Vec<BoardColumn> {
    TodoStatus::ALL
        .iter()
        .map(|&status| BoardColumn {
            status,
            cards: store
                .by_status(status)
                .map(|(index, item)| TodoCard {
                    index,
                    id: item.id,
                    task: item.task.clone(),
                    due_label: format_due_date(item.date),
                    completed: item.completed,
                })
                .collect(),
        })
        .collect()
}

/// Formats a date as `<Month> <day><ordinal>, <year>`.
pub fn format_due_date(date: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
