//! Todo item domain model.
//!
//! # Responsibility
//! - Define the record shared by the store, the slot payload and board views.
//! - Own the status vocabulary and its text labels.
//!
//! # Invariants
//! - `task` is never empty.
//! - `completed == true` exactly when `status == TodoStatus::Completed` for
//!   records produced by store operations.
//! - `id` is generated once at creation and survives edits.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a todo item.
///
/// Positions shift on delete; the id does not.
pub type TodoId = Uuid;

/// Calendar date format used on the wire.
pub const DATE_WIRE_FORMAT: &str = "%Y-%m-%d";

/// Workflow column a todo item belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TodoStatus {
    /// Captured but not started.
    #[default]
    Proposed,
    /// Work has started.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Done.
    Completed,
}

impl TodoStatus {
    /// All statuses in board column order.
    pub const ALL: [TodoStatus; 3] = [Self::Proposed, Self::InProgress, Self::Completed];

    /// Human-readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Proposed => "Proposed",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl Display for TodoStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TodoStatus {
    type Err = TodoValidationError;

    /// Parses a status label case-insensitively.
    ///
    /// Accepts `In Progress` as well as `in_progress` / `in-progress`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "proposed" => Ok(Self::Proposed),
            "in progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(TodoValidationError::UnknownStatus(value.to_string())),
        }
    }
}

/// Validation failures for todo item fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Task label is the empty string.
    EmptyTask,
    /// Status label outside `Proposed | In Progress | Completed`.
    UnknownStatus(String),
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTask => write!(f, "task must not be empty"),
            Self::UnknownStatus(value) => write!(
                f,
                "unknown status `{value}`; expected Proposed|In Progress|Completed"
            ),
        }
    }
}

impl Error for TodoValidationError {}

/// One task record on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TodoItemWire")]
pub struct TodoItem {
    /// Stable id; absent in payloads written before ids existed.
    pub id: TodoId,
    /// Task label shown on the card.
    pub task: String,
    /// Due date. Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Checkbox state.
    pub completed: bool,
    /// Board column.
    pub status: TodoStatus,
}

impl TodoItem {
    /// Creates a new proposed, not-completed item with a generated id.
    ///
    /// # Errors
    /// - `TodoValidationError::EmptyTask` when `task` is empty.
    pub fn new(task: impl Into<String>, date: NaiveDate) -> Result<Self, TodoValidationError> {
        Self::with_id(Uuid::new_v4(), task, date)
    }

    /// Creates a new item with a caller-provided id.
    pub fn with_id(
        id: TodoId,
        task: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, TodoValidationError> {
        let item = Self {
            id,
            task: task.into(),
            date,
            completed: false,
            status: TodoStatus::Proposed,
        };
        item.validate()?;
        Ok(item)
    }

    /// Checks field-level invariants.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.task.is_empty() {
            return Err(TodoValidationError::EmptyTask);
        }
        Ok(())
    }

    /// Returns whether `completed` agrees with `status`.
    pub fn is_consistent(&self) -> bool {
        self.completed == (self.status == TodoStatus::Completed)
    }

    /// Recomputes `completed` from `status`.
    ///
    /// Returns `true` when the flag changed.
    pub fn reconcile_completion(&mut self) -> bool {
        let expected = self.status == TodoStatus::Completed;
        let changed = self.completed != expected;
        self.completed = expected;
        changed
    }
}

/// Deserialization shape; tolerant of older payloads.
#[derive(Deserialize)]
struct TodoItemWire {
    #[serde(default)]
    id: Option<TodoId>,
    task: String,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    date: NaiveDate,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    status: TodoStatus,
}

impl TryFrom<TodoItemWire> for TodoItem {
    type Error = TodoValidationError;

    fn try_from(wire: TodoItemWire) -> Result<Self, Self::Error> {
        let item = Self {
            id: wire.id.unwrap_or_else(Uuid::new_v4),
            task: wire.task,
            date: wire.date,
            completed: wire.completed,
            status: wire.status,
        };
        item.validate()?;
        Ok(item)
    }
}

/// Parses a wire date into a calendar date.
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp which is converted to the
/// local calendar date it falls on.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_WIRE_FORMAT) {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Local).date_naive())
}

fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid date `{raw}`; expected YYYY-MM-DD or RFC 3339 timestamp"
        ))
    })
}

/// Today's date in the local timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::{parse_calendar_date, TodoStatus};
    use chrono::NaiveDate;

    #[test]
    fn status_parses_label_variants() {
        assert_eq!("In Progress".parse::<TodoStatus>(), Ok(TodoStatus::InProgress));
        assert_eq!("in_progress".parse::<TodoStatus>(), Ok(TodoStatus::InProgress));
        assert_eq!(" completed ".parse::<TodoStatus>(), Ok(TodoStatus::Completed));
        assert!("Archived".parse::<TodoStatus>().is_err());
    }

    #[test]
    fn parse_calendar_date_accepts_plain_date() {
        assert_eq!(
            parse_calendar_date("2024-05-01"),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(parse_calendar_date("05/01/2024"), None);
    }
}
