//! Entry Map Module
//!
//! Plain single-owner mapping from word to entry. Holds no lock of its own;
//! `LocalStore` gives it to exactly one worker task.

use std::collections::HashMap;

use crate::error::{Result, StoreError};
use crate::store::{Entry, Snapshot};

// == Entry Map ==
/// Owned word -> entry mapping.
#[derive(Debug, Default)]
pub struct EntryMap {
    entries: HashMap<String, Entry>,
}

impl EntryMap {
    // == Constructor ==
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    // == Upsert ==
    /// Inserts the entry for `word`, replacing any previous one.
    ///
    /// Returns true if an existing entry was replaced.
    pub fn upsert(&mut self, word: String, definition: String) -> bool {
        let entry = Entry::new(word.clone(), definition);
        self.entries.insert(word, entry).is_some()
    }

    // == Lookup ==
    /// Returns a clone of the entry for `word`.
    pub fn lookup(&self, word: &str) -> Result<Entry> {
        self.entries
            .get(word)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(word.to_string()))
    }

    // == Delete ==
    /// Removes the entry for `word`.
    pub fn delete(&mut self, word: &str) -> Result<()> {
        if self.entries.remove(word).is_some() {
            Ok(())
        } else {
            Err(StoreError::NotFound(word.to_string()))
        }
    }

    // == Snapshot ==
    /// Copies the key list and entries in one pass.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            words: self.entries.keys().cloned().collect(),
            entries: self.entries.clone(),
        }
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_map_new() {
        let map = EntryMap::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_map_upsert_and_lookup() {
        let mut map = EntryMap::new();

        let replaced = map.upsert("test_word".to_string(), "test_definition".to_string());
        assert!(!replaced);

        let entry = map.lookup("test_word").unwrap();
        assert_eq!(entry, Entry::new("test_word", "test_definition"));
    }

    #[test]
    fn test_map_lookup_nonexistent() {
        let map = EntryMap::new();
        assert!(matches!(map.lookup("missing"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_map_overwrite() {
        let mut map = EntryMap::new();

        map.upsert("word".to_string(), "first".to_string());
        let replaced = map.upsert("word".to_string(), "second".to_string());

        assert!(replaced);
        assert_eq!(map.lookup("word").unwrap().definition, "second");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_map_delete() {
        let mut map = EntryMap::new();

        map.upsert("word".to_string(), "definition".to_string());
        map.delete("word").unwrap();

        assert!(map.is_empty());
        assert!(matches!(map.lookup("word"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_map_delete_nonexistent_leaves_map_unchanged() {
        let mut map = EntryMap::new();
        map.upsert("kept".to_string(), "definition".to_string());

        let result = map.delete("missing");

        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert_eq!(map.len(), 1);
        assert!(map.lookup("kept").is_ok());
    }

    #[test]
    fn test_map_snapshot() {
        let mut map = EntryMap::new();
        map.upsert("apple".to_string(), "a fruit".to_string());
        map.upsert("banana".to_string(), "another fruit".to_string());
        map.upsert("cherry".to_string(), "yet another fruit".to_string());

        let snapshot = map.snapshot();

        let words: HashSet<&str> = snapshot.words.iter().map(String::as_str).collect();
        assert_eq!(words, HashSet::from(["apple", "banana", "cherry"]));
        assert_eq!(snapshot.entries["banana"].definition, "another fruit");
        assert_eq!(snapshot.entries.len(), 3);
    }

    #[test]
    fn test_snapshot_is_detached_from_map() {
        let mut map = EntryMap::new();
        map.upsert("apple".to_string(), "a fruit".to_string());

        let snapshot = map.snapshot();
        map.upsert("apple".to_string(), "changed".to_string());
        map.delete("apple").unwrap();

        assert_eq!(snapshot.entries["apple"].definition, "a fruit");
    }
}
