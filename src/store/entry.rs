//! Entry Module
//!
//! The unit of storage: one word and its definition.

use std::fmt;

use serde::{Deserialize, Serialize};

// == Entry ==
/// A word together with its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The word, unique within a store
    pub word: String,
    /// The definition text
    pub definition: String,
}

impl Entry {
    /// Creates a new entry.
    pub fn new(word: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
        }
    }
}

/// An entry displays as its definition.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.definition)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_display_is_definition() {
        let entry = Entry::new("apple", "a fruit");
        assert_eq!(entry.to_string(), "a fruit");
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = Entry::new("apple", "a fruit");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["word"], "apple");
        assert_eq!(json["definition"], "a fruit");
    }

    #[test]
    fn test_entry_decode_rejects_missing_field() {
        let result: Result<Entry, _> = serde_json::from_str(r#"{"word":"apple"}"#);
        assert!(result.is_err());
    }
}
