//! Use-case services over the todo list.
//!
//! # Responsibility
//! - Keep mutation rules in the store, independent of storage details.
//! - Provide the form and board projections the UI layer binds to.

pub mod board;
pub mod todo_form;
pub mod todo_store;
