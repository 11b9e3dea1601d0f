//! Request DTOs for the dictionary API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Allowed word length in bytes (inclusive)
pub const WORD_LENGTH: (usize, usize) = (3, 50);

/// Allowed definition length in bytes (inclusive)
pub const DEFINITION_LENGTH: (usize, usize) = (5, 500);

/// Request body for POST /add
#[derive(Debug, Clone, Deserialize)]
pub struct AddRequest {
    /// The word to store
    pub word: String,
    /// Its definition
    pub definition: String,
}

impl AddRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let (min, max) = WORD_LENGTH;
        if self.word.len() < min || self.word.len() > max {
            return Some(format!(
                "Word length must be between {} and {} characters",
                min, max
            ));
        }

        let (min, max) = DEFINITION_LENGTH;
        if self.definition.len() < min || self.definition.len() > max {
            return Some(format!(
                "Definition length must be between {} and {} characters",
                min, max
            ));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(word: &str, definition: &str) -> AddRequest {
        AddRequest {
            word: word.to_string(),
            definition: definition.to_string(),
        }
    }

    #[test]
    fn test_add_request_deserialize() {
        let json = r#"{"word": "example", "definition": "an example"}"#;
        let req: AddRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.word, "example");
        assert_eq!(req.definition, "an example");
    }

    #[test]
    fn test_add_request_missing_definition() {
        let json = r#"{"word": "example"}"#;
        assert!(serde_json::from_str::<AddRequest>(json).is_err());
    }

    #[test]
    fn test_validate_valid_request() {
        assert!(request("example", "an example").validate().is_none());
    }

    #[test]
    fn test_validate_word_bounds() {
        assert!(request("ab", "an example").validate().is_some());
        assert!(request("abc", "an example").validate().is_none());
        assert!(request(&"w".repeat(50), "an example").validate().is_none());
        assert!(request(&"w".repeat(51), "an example").validate().is_some());
    }

    #[test]
    fn test_validate_definition_bounds() {
        assert!(request("example", "four").validate().is_some());
        assert!(request("example", "fives").validate().is_none());
        assert!(request("example", &"d".repeat(500)).validate().is_none());
        let msg = request("example", &"d".repeat(501)).validate().unwrap();
        assert!(msg.contains("Definition"));
    }
}
