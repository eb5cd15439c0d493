//! Storage layer for the todo list.
//!
//! Owns the `items` schema and the fixed statements that read and mutate it.
//! Two backends implement [`ItemStore`]: [`SqliteStore`] for real persistence
//! and [`NullStore`] for platforms without an embedded engine.

use crate::core::error::{Result, TodoError};
use crate::core::item::Item;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::debug;

/// The persistence contract shared by every backend.
///
/// Rejected input (`None` or empty text) and unknown ids are silent no-ops,
/// never errors.
pub trait ItemStore: Send {
    /// Create the items table if it is absent.
    fn ensure_schema(&mut self) -> Result<()>;

    /// All items whose `done` flag matches.
    fn list(&mut self, done: bool) -> Result<Vec<Item>>;

    /// Insert a new todo item. Returns the assigned id, or `None` when the
    /// value was rejected.
    fn insert(&mut self, value: Option<&str>) -> Result<Option<i64>>;

    /// Move an item to the done partition.
    fn mark_done(&mut self, id: i64) -> Result<()>;

    /// Remove an item permanently.
    fn delete(&mut self, id: i64) -> Result<()>;

    /// Release the underlying handle. Later calls fail with `StoreClosed`.
    fn close(&mut self) -> Result<()>;
}

/// SQLite-backed store.
pub struct SqliteStore {
    conn: Option<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "opened sqlite store");
        Ok(Self { conn: Some(conn) })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn: Some(conn) })
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(TodoError::StoreClosed)
    }
}

impl ItemStore for SqliteStore {
    fn ensure_schema(&mut self) -> Result<()> {
        self.conn()?.execute(
            "CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                done INTEGER,
                value TEXT
            )",
            [],
        )?;
        Ok(())
    }

    fn list(&mut self, done: bool) -> Result<Vec<Item>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, done, value FROM items WHERE done = ?1")?;

        let items = stmt
            .query_map(params![done as i64], |row| {
                Ok(Item {
                    id: row.get(0)?,
                    done: row.get(1)?,
                    value: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(done, count = items.len(), "listed items");
        Ok(items)
    }

    fn insert(&mut self, value: Option<&str>) -> Result<Option<i64>> {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => {
                debug!("dropped empty insert");
                return Ok(None);
            }
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO items (done, value) VALUES (0, ?1)",
            params![value],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, "inserted item");
        Ok(Some(id))
    }

    fn mark_done(&mut self, id: i64) -> Result<()> {
        let changed = self
            .conn()?
            .execute("UPDATE items SET done = 1 WHERE id = ?1", params![id])?;
        debug!(id, changed, "marked item done");
        Ok(())
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let changed = self
            .conn()?
            .execute("DELETE FROM items WHERE id = ?1", params![id])?;
        debug!(id, changed, "deleted item");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| TodoError::Db(e))?;
            debug!("closed sqlite store");
        }
        Ok(())
    }
}

/// Store for platforms without an embedded engine.
///
/// Every query returns no rows and every mutation is accepted and forgotten.
#[derive(Debug, Default)]
pub struct NullStore;

impl ItemStore for NullStore {
    fn ensure_schema(&mut self) -> Result<()> {
        Ok(())
    }

    fn list(&mut self, _done: bool) -> Result<Vec<Item>> {
        Ok(Vec::new())
    }

    fn insert(&mut self, _value: Option<&str>) -> Result<Option<i64>> {
        Ok(None)
    }

    fn mark_done(&mut self, _id: i64) -> Result<()> {
        Ok(())
    }

    fn delete(&mut self, _id: i64) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn setup() -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store
    }

    #[test]
    fn test_ensure_schema_creates_items_table() {
        let store = setup();

        let tables: Vec<String> = store
            .conn()
            .unwrap()
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"items".to_string()));
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let mut store = setup();
        store.insert(Some("keep me")).unwrap();

        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();

        assert_eq!(store.list(false).unwrap().len(), 1);
    }

    #[test]
    fn test_list_empty_table() {
        let mut store = setup();
        assert!(store.list(false).unwrap().is_empty());
        assert!(store.list(true).unwrap().is_empty());
    }

    #[test]
    fn test_insert_adds_one_todo() {
        let mut store = setup();

        let id = store.insert(Some("buy milk")).unwrap().unwrap();

        let todo = store.list(false).unwrap();
        assert_eq!(
            todo,
            vec![Item {
                id,
                done: false,
                value: "buy milk".to_string()
            }]
        );
        assert!(store.list(true).unwrap().is_empty());
    }

    #[test]
    fn test_insert_rejects_empty_and_none() {
        let mut store = setup();

        assert_eq!(store.insert(Some("")).unwrap(), None);
        assert_eq!(store.insert(None).unwrap(), None);

        assert!(store.list(false).unwrap().is_empty());
        assert!(store.list(true).unwrap().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = setup();
        let a = store.insert(Some("a")).unwrap().unwrap();
        let b = store.insert(Some("b")).unwrap().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_mark_done_moves_item() {
        let mut store = setup();
        let id = store.insert(Some("x")).unwrap().unwrap();

        store.mark_done(id).unwrap();

        assert!(store.list(false).unwrap().is_empty());
        let done = store.list(true).unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, id);
        assert_eq!(done[0].value, "x");
        assert!(done[0].done);
    }

    #[test]
    fn test_mark_done_twice_keeps_one_row() {
        let mut store = setup();
        let id = store.insert(Some("x")).unwrap().unwrap();

        store.mark_done(id).unwrap();
        store.mark_done(id).unwrap();

        assert_eq!(store.list(true).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_removes_item() {
        let mut store = setup();
        let id = store.insert(Some("y")).unwrap().unwrap();
        store.mark_done(id).unwrap();

        store.delete(id).unwrap();

        assert!(store.list(false).unwrap().is_empty());
        assert!(store.list(true).unwrap().is_empty());
    }

    #[test]
    fn test_missing_ids_are_noops() {
        let mut store = setup();

        store.mark_done(9999).unwrap();
        store.delete(9999).unwrap();

        assert!(store.list(false).unwrap().is_empty());
        assert!(store.list(true).unwrap().is_empty());
    }

    #[test]
    fn test_closed_store_errors() {
        let mut store = setup();
        store.close().unwrap();
        store.close().unwrap();

        assert!(matches!(store.list(false), Err(TodoError::StoreClosed)));
        assert!(matches!(
            store.insert(Some("late")),
            Err(TodoError::StoreClosed)
        ));
    }

    #[test]
    fn test_data_survives_reopen() {
        let temp = NamedTempFile::new().unwrap();

        {
            let mut store = SqliteStore::open(temp.path()).unwrap();
            store.ensure_schema().unwrap();
            store.insert(Some("persisted")).unwrap();
            store.close().unwrap();
        }

        let mut store = SqliteStore::open(temp.path()).unwrap();
        store.ensure_schema().unwrap();
        let todo = store.list(false).unwrap();
        assert_eq!(todo.len(), 1);
        assert_eq!(todo[0].value, "persisted");
    }

    #[test]
    fn test_reads_legacy_table_without_autoincrement() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .conn()
            .unwrap()
            .execute(
                "CREATE TABLE items (id INTEGER PRIMARY KEY NOT NULL, done INT, value TEXT)",
                [],
            )
            .unwrap();
        store.ensure_schema().unwrap();

        let id = store.insert(Some("old file")).unwrap().unwrap();
        store.mark_done(id).unwrap();
        assert_eq!(store.list(true).unwrap()[0].value, "old file");
    }

    #[test]
    fn test_null_store_is_inert() {
        let mut store = NullStore;
        store.ensure_schema().unwrap();
        assert_eq!(store.insert(Some("ignored")).unwrap(), None);
        store.mark_done(1).unwrap();
        store.delete(1).unwrap();
        assert!(store.list(false).unwrap().is_empty());
        assert!(store.list(true).unwrap().is_empty());
    }
}
