//! Error types for the todo list.
//!
//! Rejected input and unknown ids are not errors: the store treats them as
//! silent no-ops. Everything here is an engine or plumbing failure.

use std::io;
use thiserror::Error;

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, TodoError>;

/// All errors that can occur in the todo application.
#[derive(Error, Debug)]
pub enum TodoError {
    /// Database error.
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store was closed, or its worker is gone.
    #[error("Store is closed")]
    StoreClosed,

    /// Unrecognized shell command.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}
