//! Domain model for the todo board.
//!
//! # Responsibility
//! - Define the canonical todo record and its status vocabulary.
//!
//! # Invariants
//! - One record shape is shared by storage, store operations and board views.

pub mod todo;
