//! Repository layer: key/value slots and the todo persistence port.
//!
//! # Responsibility
//! - Define the storage contracts the store depends on.
//! - Isolate SQLite and JSON details from store orchestration.
//!
//! # Invariants
//! - A slot holds one opaque text value and is overwritten wholesale.
//! - Decoding rejects invalid persisted state instead of masking it.

pub mod slot_repo;
pub mod todo_repo;
