//! Shared request/response types used by API-facing crates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub message: String,
}

impl HealthCheckResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Server is running".to_string(),
        }
    }
}

/// Convenience alias for handlers that prefer a shorter type name.
pub type HealthResponse = HealthCheckResponse;

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Confirmation returned by mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContentResponse {
    pub content: String,
}

/// `POST /files` body. A missing `content` means an empty file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFileRequest {
    pub filename: String,
    #[serde(default)]
    pub content: String,
}

/// `PUT /files/{name}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFileRequest {
    #[serde(default)]
    pub content: String,
}
