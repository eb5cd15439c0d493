//! Runtime configuration: where the database lives and which backend to use.

use crate::core::error::Result;
use crate::core::store::{ItemStore, NullStore, SqliteStore};
use std::path::PathBuf;
use tracing::info;

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "todo.db";

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Backend {
    /// Persist items in a SQLite database file.
    #[default]
    Sqlite,
    /// No embedded engine available: nothing is stored.
    Null,
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub backend: Backend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            backend: Backend::default(),
        }
    }
}

impl Config {
    /// Whether items written through this configuration are kept.
    pub fn persists(&self) -> bool {
        self.backend == Backend::Sqlite
    }

    /// Open the configured backend with its schema in place.
    pub fn open_store(&self) -> Result<Box<dyn ItemStore>> {
        let mut store: Box<dyn ItemStore> = match self.backend {
            Backend::Sqlite => Box::new(SqliteStore::open(&self.db_path)?),
            Backend::Null => Box::new(NullStore),
        };
        store.ensure_schema()?;
        info!(backend = ?self.backend, path = %self.db_path.display(), "store ready");
        Ok(store)
    }
}
