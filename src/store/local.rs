//! Local Store Module
//!
//! In-process backing. A single worker task owns the `EntryMap`; handles
//! send it requests over an mpsc queue and wait for the reply on a oneshot
//! channel. Reads take the same path as writes, so every result is computed
//! against a fully applied state.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::store::{Entry, EntryMap, EntryStore, Snapshot};

/// Requests buffered before senders wait on the worker.
const DEFAULT_QUEUE_CAPACITY: usize = 256;

const WORKER_STOPPED: &str = "store worker is not running";

// == Commands ==
/// Requests processed by the worker, one at a time.
enum Command {
    Upsert {
        word: String,
        definition: String,
        reply: oneshot::Sender<()>,
    },
    Lookup {
        word: String,
        reply: oneshot::Sender<Result<Entry>>,
    },
    Delete {
        word: String,
        reply: oneshot::Sender<Result<()>>,
    },
    Enumerate {
        reply: oneshot::Sender<Snapshot>,
    },
}

// == Local Store ==
/// Cloneable handle to the worker that owns the entries.
///
/// The worker exits once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct LocalStore {
    requests: mpsc::Sender<Command>,
}

impl LocalStore {
    // == Constructors ==
    /// Spawns a worker over an empty map. Must be called inside a tokio runtime.
    pub fn spawn() -> Self {
        Self::spawn_with(EntryMap::new(), DEFAULT_QUEUE_CAPACITY)
    }

    /// Spawns a worker over `map` with a request queue of `capacity`.
    pub fn spawn_with(map: EntryMap, capacity: usize) -> Self {
        let (requests, receiver) = mpsc::channel(capacity.max(1));
        tokio::spawn(run_worker(map, receiver));
        Self { requests }
    }

    /// Sends one command and waits for the worker's reply.
    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(command(reply))
            .await
            .map_err(|_| StoreError::Internal(WORKER_STOPPED.to_string()))?;
        response
            .await
            .map_err(|_| StoreError::Internal(WORKER_STOPPED.to_string()))
    }
}

#[async_trait]
impl EntryStore for LocalStore {
    async fn upsert(&self, word: String, definition: String) -> Result<()> {
        self.request(|reply| Command::Upsert {
            word,
            definition,
            reply,
        })
        .await
    }

    async fn lookup(&self, word: &str) -> Result<Entry> {
        let word = word.to_string();
        self.request(|reply| Command::Lookup { word, reply }).await?
    }

    async fn delete(&self, word: &str) -> Result<()> {
        let word = word.to_string();
        self.request(|reply| Command::Delete { word, reply }).await?
    }

    async fn enumerate(&self) -> Result<Snapshot> {
        self.request(|reply| Command::Enumerate { reply }).await
    }
}

// == Worker ==
async fn run_worker(mut map: EntryMap, mut receiver: mpsc::Receiver<Command>) {
    debug!(entries = map.len(), "Store worker started");

    while let Some(command) = receiver.recv().await {
        apply(&mut map, command);
    }

    debug!(entries = map.len(), "Store worker stopped");
}

/// Applies a command fully before replying. A dropped reply receiver does
/// not undo the change.
fn apply(map: &mut EntryMap, command: Command) {
    match command {
        Command::Upsert {
            word,
            definition,
            reply,
        } => {
            let replaced = map.upsert(word.clone(), definition);
            debug!(word = %word, replaced, "upsert applied");
            let _ = reply.send(());
        }
        Command::Lookup { word, reply } => {
            let result = map.lookup(&word);
            debug!(word = %word, found = result.is_ok(), "lookup served");
            let _ = reply.send(result);
        }
        Command::Delete { word, reply } => {
            let result = map.delete(&word);
            debug!(word = %word, removed = result.is_ok(), "delete applied");
            let _ = reply.send(result);
        }
        Command::Enumerate { reply } => {
            let snapshot = map.snapshot();
            debug!(entries = snapshot.len(), "snapshot taken");
            let _ = reply.send(snapshot);
        }
    }
}
