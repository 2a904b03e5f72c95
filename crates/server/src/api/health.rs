use axum::Json;
use text_editor_api_types::HealthResponse;

/// 存活探针。
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
