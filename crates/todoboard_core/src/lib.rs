//! Core state management for the todo board.
//! This crate owns the todo list invariants and its persistence contract.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::TodoConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{
    local_today, parse_calendar_date, TodoId, TodoItem, TodoStatus, TodoValidationError,
};
pub use repo::slot_repo::{KeyValueSlots, MemorySlots, RepoError, RepoResult, SqliteSlotRepository};
pub use repo::todo_repo::{
    PersistenceError, PersistenceResult, SlotTodoPersistence, TodoPersistence, DEFAULT_SLOT_KEY,
};
pub use service::board::{board, format_due_date, BoardColumn, TodoCard};
pub use service::todo_form::TodoForm;
pub use service::todo_store::{StoreError, StoreResult, TodoStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
