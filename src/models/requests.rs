//! Request DTOs for the admin API
//!
//! Defines the structure of incoming HTTP request bodies and path checks.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::MAX_KEY_LENGTH;

/// Request body for storing a value (PUT /regions/:region/:key)
///
/// The value is stored as-is; the cache never looks inside it.
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// The value to store
    pub value: Value,
}

/// Validates a key taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_request_deserialize() {
        let json = r#"{"value": {"name": "Paracetamol", "uses": ["fever"]}}"#;
        let req: PutRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.value["name"], "Paracetamol");
    }

    #[test]
    fn test_put_request_requires_value() {
        assert!(serde_json::from_str::<PutRequest>(r#"{}"#).is_err());
    }

    #[test]
    fn test_validate_empty_key() {
        assert!(validate_key("").is_some());
    }

    #[test]
    fn test_validate_long_key() {
        assert!(validate_key(&"x".repeat(MAX_KEY_LENGTH + 1)).is_some());
        assert!(validate_key(&"x".repeat(MAX_KEY_LENGTH)).is_none());
    }

    #[test]
    fn test_validate_valid_key() {
        assert!(validate_key("paracetamol").is_none());
    }
}
