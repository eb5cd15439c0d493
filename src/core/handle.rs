//! Asynchronous access to the store.
//!
//! A single worker thread owns the backend and executes requests in arrival
//! order. Callers get a cloneable [`StoreHandle`] and await each completion.

use crate::core::error::{Result, TodoError};
use crate::core::item::Item;
use crate::core::store::ItemStore;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

type Reply<T> = oneshot::Sender<Result<T>>;

enum Request {
    EnsureSchema(Reply<()>),
    List { done: bool, reply: Reply<Vec<Item>> },
    Insert { value: Option<String>, reply: Reply<Option<i64>> },
    MarkDone { id: i64, reply: Reply<()> },
    Delete { id: i64, reply: Reply<()> },
    Close(Reply<()>),
}

/// Cloneable handle to the store worker.
#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::UnboundedSender<Request>,
}

impl StoreHandle {
    /// Move the store onto its own worker thread.
    pub fn spawn(store: Box<dyn ItemStore>) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::Builder::new()
            .name("todo-store".to_string())
            .spawn(move || run_worker(store, rx))?;
        Ok(Self { tx })
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        self.call(Request::EnsureSchema).await
    }

    pub async fn list(&self, done: bool) -> Result<Vec<Item>> {
        self.call(|reply| Request::List { done, reply }).await
    }

    pub async fn insert(&self, value: Option<&str>) -> Result<Option<i64>> {
        let value = value.map(str::to_string);
        self.call(|reply| Request::Insert { value, reply }).await
    }

    pub async fn mark_done(&self, id: i64) -> Result<()> {
        self.call(|reply| Request::MarkDone { id, reply }).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.call(|reply| Request::Delete { id, reply }).await
    }

    /// Close the backend and stop the worker. Every handle sees
    /// `StoreClosed` afterwards.
    pub async fn close(&self) -> Result<()> {
        self.call(Request::Close).await
    }

    async fn call<T>(&self, make: impl FnOnce(Reply<T>) -> Request) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .map_err(|_| TodoError::StoreClosed)?;
        rx.await.map_err(|_| TodoError::StoreClosed)?
    }
}

fn run_worker(mut store: Box<dyn ItemStore>, mut rx: mpsc::UnboundedReceiver<Request>) {
    debug!("store worker started");

    while let Some(request) = rx.blocking_recv() {
        match request {
            Request::EnsureSchema(reply) => {
                let _ = reply.send(store.ensure_schema());
            }
            Request::List { done, reply } => {
                let _ = reply.send(store.list(done));
            }
            Request::Insert { value, reply } => {
                let _ = reply.send(store.insert(value.as_deref()));
            }
            Request::MarkDone { id, reply } => {
                let _ = reply.send(store.mark_done(id));
            }
            Request::Delete { id, reply } => {
                let _ = reply.send(store.delete(id));
            }
            Request::Close(reply) => {
                let _ = reply.send(store.close());
                debug!("store worker closed");
                return;
            }
        }
    }

    // All handles dropped without an explicit close.
    if let Err(e) = store.close() {
        warn!(error = %e, "failed to close store");
    }
    debug!("store worker stopped");
}
