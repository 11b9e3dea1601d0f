//! Response DTOs for the dictionary API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::store::{Entry, Snapshot};

/// Response body for GET /define/:word, also used inside list responses
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub word: String,
    pub definition: String,
}

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            word: entry.word,
            definition: entry.definition,
        }
    }
}

/// Response body for POST /add
#[derive(Debug, Clone, Serialize)]
pub struct AddResponse {
    /// Success message
    pub message: String,
    /// The word that was stored
    pub word: String,
}

impl AddResponse {
    /// Creates a new AddResponse
    pub fn new(word: impl Into<String>) -> Self {
        let word = word.into();
        Self {
            message: format!("Word '{}' added successfully", word),
            word,
        }
    }
}

/// Response body for DELETE /remove/:word
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    /// Success message
    pub message: String,
    /// The word that was removed
    pub word: String,
}

impl RemoveResponse {
    /// Creates a new RemoveResponse
    pub fn new(word: impl Into<String>) -> Self {
        let word = word.into();
        Self {
            message: format!("Word '{}' removed successfully", word),
            word,
        }
    }
}

/// Response body for GET /list, entries ordered by word
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub count: usize,
    pub entries: Vec<EntryResponse>,
}

impl From<Snapshot> for ListResponse {
    fn from(snapshot: Snapshot) -> Self {
        let entries: Vec<EntryResponse> = snapshot
            .sorted_entries()
            .into_iter()
            .map(EntryResponse::from)
            .collect();
        Self {
            count: entries.len(),
            entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_response_serialize() {
        let resp = AddResponse::new("apple");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("apple"));
        assert!(json.contains("added"));
    }

    #[test]
    fn test_remove_response_serialize() {
        let resp = RemoveResponse::new("apple");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("apple"));
        assert!(json.contains("removed"));
    }

    #[test]
    fn test_list_response_sorted_by_word() {
        let mut snapshot = Snapshot::default();
        for (word, definition) in [("cherry", "c"), ("apple", "a"), ("banana", "b")] {
            snapshot.words.push(word.to_string());
            snapshot
                .entries
                .insert(word.to_string(), Entry::new(word, definition));
        }

        let resp = ListResponse::from(snapshot);

        assert_eq!(resp.count, 3);
        let words: Vec<&str> = resp.entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
