//! Remote Store Module
//!
//! Backing that keeps every entry as a JSON string in one Redis hash.
//! A single client is shared behind a mutex, so this process has at most
//! one remote store operation in flight. Every remote call is bounded by
//! the configured timeout.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::store::{Entry, EntryStore, Snapshot};

// == Remote Client Trait ==
/// Hash commands the remote store needs from a key-value server.
///
/// `namespace` names the hash; `field` is the word.
#[async_trait]
pub trait RemoteClient: Send {
    async fn hget(&mut self, namespace: &str, field: &str) -> Result<Option<String>>;

    async fn hset(&mut self, namespace: &str, field: &str, value: String) -> Result<()>;

    async fn hexists(&mut self, namespace: &str, field: &str) -> Result<bool>;

    async fn hdel(&mut self, namespace: &str, field: &str) -> Result<()>;

    /// Returns every field/value pair of the hash in one round trip, as raw
    /// bytes so one bad pair cannot fail the whole reply.
    async fn hgetall(&mut self, namespace: &str) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;
}

// == Redis Client ==
/// `RemoteClient` over a multiplexed tokio Redis connection.
pub struct RedisClient {
    connection: MultiplexedConnection,
}

impl RedisClient {
    /// Opens a connection to `url`, giving up after `timeout`.
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let connection = tokio::time::timeout(timeout, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| {
                StoreError::Backend(format!("connecting to {} timed out after {:?}", url, timeout))
            })??;

        info!("Connected to Redis at {}", url);
        Ok(Self { connection })
    }
}

#[async_trait]
impl RemoteClient for RedisClient {
    async fn hget(&mut self, namespace: &str, field: &str) -> Result<Option<String>> {
        let value: Option<String> = self.connection.hget(namespace, field).await?;
        Ok(value)
    }

    async fn hset(&mut self, namespace: &str, field: &str, value: String) -> Result<()> {
        let _: () = self.connection.hset(namespace, field, value).await?;
        Ok(())
    }

    async fn hexists(&mut self, namespace: &str, field: &str) -> Result<bool> {
        let exists: bool = self.connection.hexists(namespace, field).await?;
        Ok(exists)
    }

    async fn hdel(&mut self, namespace: &str, field: &str) -> Result<()> {
        let _: () = self.connection.hdel(namespace, field).await?;
        Ok(())
    }

    async fn hgetall(&mut self, namespace: &str) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let pairs: HashMap<Vec<u8>, Vec<u8>> = self.connection.hgetall(namespace).await?;
        Ok(pairs.into_iter().collect())
    }
}

// == Remote Store ==
/// Entry store backed by a remote hash.
pub struct RemoteStore<C> {
    client: Mutex<C>,
    namespace: String,
    timeout: Duration,
}

impl<C: RemoteClient> RemoteStore<C> {
    // == Constructor ==
    /// Creates a store that keeps entries in the hash `namespace`.
    pub fn new(client: C, namespace: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Mutex::new(client),
            namespace: namespace.into(),
            timeout,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Runs one remote call under the store timeout.
    async fn bounded<T>(
        &self,
        command: &'static str,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Backend(format!(
                "{} timed out after {:?}",
                command, self.timeout
            ))),
        }
    }
}

fn decode(word: &str, raw: &str) -> Result<Entry> {
    serde_json::from_str(raw)
        .map_err(|e| StoreError::Backend(format!("undecodable entry for '{}': {}", word, e)))
}

#[async_trait]
impl<C: RemoteClient> EntryStore for RemoteStore<C> {
    async fn upsert(&self, word: String, definition: String) -> Result<()> {
        let payload = serde_json::to_string(&Entry::new(word.clone(), definition))?;

        let mut client = self.client.lock().await;
        self.bounded("HSET", client.hset(&self.namespace, &word, payload))
            .await?;

        debug!(word = %word, namespace = %self.namespace, "remote upsert applied");
        Ok(())
    }

    async fn lookup(&self, word: &str) -> Result<Entry> {
        let raw = {
            let mut client = self.client.lock().await;
            self.bounded("HGET", client.hget(&self.namespace, word))
                .await?
        };

        match raw {
            Some(raw) => decode(word, &raw),
            None => Err(StoreError::NotFound(word.to_string())),
        }
    }

    async fn delete(&self, word: &str) -> Result<()> {
        let mut client = self.client.lock().await;

        let exists = self
            .bounded("HEXISTS", client.hexists(&self.namespace, word))
            .await?;
        if !exists {
            return Err(StoreError::NotFound(word.to_string()));
        }

        self.bounded("HDEL", client.hdel(&self.namespace, word))
            .await?;

        debug!(word = %word, namespace = %self.namespace, "remote delete applied");
        Ok(())
    }

    async fn enumerate(&self) -> Result<Snapshot> {
        let pairs = {
            let mut client = self.client.lock().await;
            self.bounded("HGETALL", client.hgetall(&self.namespace))
                .await?
        };

        let mut snapshot = Snapshot::default();
        for (field, raw) in pairs {
            let word = match String::from_utf8(field) {
                Ok(word) => word,
                Err(e) => {
                    warn!(error = %e, "Skipping entry with non UTF-8 word");
                    continue;
                }
            };
            let decoded = String::from_utf8(raw)
                .map_err(|e| StoreError::Backend(format!("non UTF-8 value for '{}': {}", word, e)))
                .and_then(|raw| decode(&word, &raw));
            match decoded {
                Ok(entry) => {
                    snapshot.words.push(word.clone());
                    snapshot.entries.insert(word, entry);
                }
                Err(e) => warn!(word = %word, error = %e, "Skipping undecodable entry"),
            }
        }

        Ok(snapshot)
    }
}
