//! todo - minimal to-do list library.
//!
//! This library contains the persistence contract (store, async handle) and
//! the list controllers that the `todo` binary drives.

pub mod cli;
pub mod core;

pub use crate::core::error::{Result, TodoError};
