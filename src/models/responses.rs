//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::Region;

/// Response body for a region read (GET /regions/:region/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub region: Region,
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    pub fn new(region: Region, key: impl Into<String>, value: Value) -> Self {
        Self {
            region,
            key: key.into(),
            value,
        }
    }
}

/// Response body for a region write (PUT /regions/:region/:key)
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    /// Success message
    pub message: String,
    pub region: Region,
    pub key: String,
}

impl PutResponse {
    pub fn new(region: Region, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' cached in region '{}'", key, region),
            region,
            key,
        }
    }
}

/// Response body for a region delete (DELETE /regions/:region/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    pub region: Region,
    pub key: String,
}

impl DeleteResponse {
    pub fn new(region: Region, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted from region '{}'", key, region),
            region,
            key,
        }
    }
}

/// Response body for the clear endpoint (POST /clear)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// Number of entries removed across all regions
    pub cleared: u64,
}

impl ClearResponse {
    pub fn new(cleared: u64) -> Self {
        Self {
            message: format!("Cleared {} entries", cleared),
            cleared,
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

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new(Region::Medicine, "aspirin", json!({"dose": "75mg"}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["region"], "medicine");
        assert_eq!(json["key"], "aspirin");
        assert_eq!(json["value"]["dose"], "75mg");
    }

    #[test]
    fn test_put_response_serialize() {
        let resp = PutResponse::new(Region::UserContext, "u1");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["region"], "user_context");
        assert!(json["message"].as_str().unwrap().contains("u1"));
    }

    #[test]
    fn test_delete_response_serialize() {
        let resp = DeleteResponse::new(Region::Ocr, "img");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("img"));
        assert!(json.contains("deleted"));
    }

    #[test]
    fn test_clear_response() {
        let resp = ClearResponse::new(12);
        assert_eq!(resp.cleared, 12);
        assert!(resp.message.contains("12"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
