//! API 错误到 HTTP 响应的映射。

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use text_editor_api_types::ErrorResponse;
use text_editor_file_store::FileStoreError;
use tracing::{error, warn};

/// API 错误类型，响应体统一为 `{"error": message}`。
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<FileStoreError> for ApiError {
    fn from(err: FileStoreError) -> Self {
        match err {
            FileStoreError::InvalidName(_) => {
                ApiError::new(StatusCode::BAD_REQUEST, "Invalid filename")
            }
            FileStoreError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, "File not found"),
            FileStoreError::AlreadyExists(_) => {
                ApiError::new(StatusCode::CONFLICT, "File already exists")
            }
            FileStoreError::StoreUnavailable { action, source } => {
                error!(action, error = %source, "file store operation failed");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to {action}"),
                )
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");
        ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("Invalid request body: {}", rejection.body_text()),
        )
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected file name in path");
        ApiError::new(StatusCode::BAD_REQUEST, "Invalid filename")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
