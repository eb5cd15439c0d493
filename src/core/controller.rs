//! List controllers and the add/submit flow.
//!
//! Each [`ListController`] binds one partition of the items table to an
//! in-memory sequence. [`App`] owns both lists, the pending input text and an
//! [`Invalidation`] channel; every successful mutation bumps the channel and
//! every subscribed list re-queries the store on its next sync.

use crate::core::error::Result;
use crate::core::handle::StoreHandle;
use crate::core::item::{Item, Partition};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Generation counter that lists subscribe to.
#[derive(Debug)]
pub struct Invalidation {
    tx: watch::Sender<u64>,
}

impl Invalidation {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx }
    }

    /// Mark every subscriber stale.
    pub fn invalidate(&self) {
        self.tx.send_modify(|generation| *generation += 1);
        debug!(generation = *self.tx.borrow(), "invalidated lists");
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for Invalidation {
    fn default() -> Self {
        Self::new()
    }
}

/// A renderable list: heading plus one row per item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<'a> {
    pub heading: &'static str,
    pub rows: &'a [Item],
}

/// Binding between one partition and the rows last loaded for it.
pub struct ListController {
    partition: Partition,
    items: Option<Vec<Item>>,
    updates: watch::Receiver<u64>,
}

impl ListController {
    pub fn new(partition: Partition, updates: watch::Receiver<u64>) -> Self {
        Self {
            partition,
            items: None,
            updates,
        }
    }

    /// Rows from the last successful load; `None` before the first one.
    pub fn items(&self) -> Option<&[Item]> {
        self.items.as_deref()
    }

    /// Whether an invalidation arrived since the last sync.
    pub fn is_stale(&self) -> bool {
        self.items.is_none() || self.updates.has_changed().unwrap_or(false)
    }

    /// Reload if never loaded or invalidated since the last sync.
    pub async fn sync(&mut self, store: &StoreHandle) {
        if !self.is_stale() {
            return;
        }
        let _ = self.updates.borrow_and_update();
        self.refresh(store).await;
    }

    /// Replace the rows with a fresh `list(done)`. On failure the previous
    /// rows stay visible.
    pub async fn refresh(&mut self, store: &StoreHandle) {
        match store.list(self.partition.done()).await {
            Ok(items) => {
                debug!(partition = ?self.partition, count = items.len(), "list refreshed");
                self.items = Some(items);
            }
            Err(e) => {
                warn!(partition = ?self.partition, error = %e, "list refresh failed");
            }
        }
    }

    /// The tap action for a row in this list: todo rows complete, done rows
    /// are cleared. Ids not shown in this list are ignored. Returns whether
    /// the store was touched.
    pub async fn tap(&mut self, store: &StoreHandle, id: i64) -> Result<bool> {
        self.sync(store).await;
        let shown = self
            .items
            .as_deref()
            .is_some_and(|rows| rows.iter().any(|item| item.id == id));
        if !shown {
            debug!(partition = ?self.partition, id, "tap on id outside list ignored");
            return Ok(false);
        }

        match self.partition {
            Partition::Todo => store.mark_done(id).await?,
            Partition::Done => store.delete(id).await?,
        }
        Ok(true)
    }

    /// Nothing to render when never loaded or empty.
    pub fn render(&self) -> Option<ListView<'_>> {
        match self.items.as_deref() {
            None | Some([]) => None,
            Some(rows) => Some(ListView {
                heading: self.partition.heading(),
                rows,
            }),
        }
    }
}

/// Top-level screen: input text plus the todo and done lists.
pub struct App {
    store: StoreHandle,
    text: Option<String>,
    invalidation: Invalidation,
    todo: ListController,
    done: ListController,
}

impl App {
    pub fn new(store: StoreHandle) -> Self {
        let invalidation = Invalidation::new();
        let todo = ListController::new(Partition::Todo, invalidation.subscribe());
        let done = ListController::new(Partition::Done, invalidation.subscribe());
        Self {
            store,
            text: None,
            invalidation,
            todo,
            done,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn list(&self, partition: Partition) -> &ListController {
        match partition {
            Partition::Todo => &self.todo,
            Partition::Done => &self.done,
        }
    }

    /// Receiver that changes whenever the lists are invalidated.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.invalidation.subscribe()
    }

    /// Submit the pending text. The text is cleared whether or not the store
    /// accepted it.
    pub async fn submit(&mut self) -> Result<Option<i64>> {
        let text = self.text.take();
        let id = self.store.insert(text.as_deref()).await?;
        self.mutated().await;
        Ok(id)
    }

    /// Tap a row in the todo list. Returns whether the row was there.
    pub async fn tap_todo(&mut self, id: i64) -> Result<bool> {
        let tapped = self.todo.tap(&self.store, id).await?;
        if tapped {
            self.mutated().await;
        }
        Ok(tapped)
    }

    /// Tap a row in the done list. Returns whether the row was there.
    pub async fn tap_done(&mut self, id: i64) -> Result<bool> {
        let tapped = self.done.tap(&self.store, id).await?;
        if tapped {
            self.mutated().await;
        }
        Ok(tapped)
    }

    /// Bring every stale list up to date.
    pub async fn sync(&mut self) {
        self.todo.sync(&self.store).await;
        self.done.sync(&self.store).await;
    }

    /// Non-empty lists, todo first.
    pub fn render(&self) -> Vec<ListView<'_>> {
        [&self.todo, &self.done]
            .into_iter()
            .filter_map(ListController::render)
            .collect()
    }

    async fn mutated(&mut self) {
        self.invalidation.invalidate();
        self.sync().await;
    }
}
