//! Core logic for the todo list.
//!
//! This module contains everything shared between the one-shot commands and
//! the interactive shell.

pub mod config;
pub mod controller;
pub mod error;
pub mod handle;
pub mod item;
pub mod store;

pub use error::{Result, TodoError};
