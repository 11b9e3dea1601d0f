//! Store Module
//!
//! Word/definition storage behind a single async interface, with an
//! in-process backing owned by one worker task and a Redis backing.

mod entry;
mod local;
mod map;
mod remote;


use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::Entry;
pub use local::LocalStore;
pub use map::EntryMap;
pub use remote::{RedisClient, RemoteClient, RemoteStore};

// == Snapshot ==
/// Point-in-time copy of the whole store.
///
/// `words` and `entries` are taken from the same state; word order is
/// unspecified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub words: Vec<String>,
    pub entries: HashMap<String, Entry>,
}

impl Snapshot {
    /// Returns the entries ordered by word.
    pub fn sorted_entries(&self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self.entries.values().cloned().collect();
        entries.sort_by(|a, b| a.word.cmp(&b.word));
        entries
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

// == Entry Store Trait ==
/// Operations every backing store provides.
///
/// These four calls are the only way callers reach the mapping.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Inserts or fully replaces the entry for `word`.
    async fn upsert(&self, word: String, definition: String) -> Result<()>;

    /// Returns the current entry for `word`, or `NotFound`.
    async fn lookup(&self, word: &str) -> Result<Entry>;

    /// Removes the entry for `word`; deleting an absent word is `NotFound`.
    async fn delete(&self, word: &str) -> Result<()>;

    /// Returns a consistent snapshot of all entries.
    async fn enumerate(&self) -> Result<Snapshot>;
}
