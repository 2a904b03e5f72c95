//! 文件 API 路由。
//!
//! 将 `/files` 下的请求映射到文件存储操作。

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use text_editor_api_types::{
    CreateFileRequest, FileContentResponse, MessageResponse, UpdateFileRequest,
};
use text_editor_file_store::FileEntry;

use super::error::ApiError;
use super::state::AppState;

/// 创建文件 API 路由。
pub fn create_files_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/files", get(list_files).post(create_file))
        .route(
            "/files/{name}",
            get(read_file).put(update_file).delete(delete_file),
        )
}

/// 列出所有文本文件。
async fn list_files(State(state): State<Arc<AppState>>) -> Result<Json<Vec<FileEntry>>, ApiError> {
    let files = state.store.list()?;
    Ok(Json(files))
}

/// 读取文件内容。
async fn read_file(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<FileContentResponse>, ApiError> {
    let Path(name) = path?;
    let content = state.store.read(&name)?;
    Ok(Json(FileContentResponse { content }))
}

/// 创建新文件。
async fn create_file(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateFileRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(request) = body?;
    state.store.create(&request.filename, &request.content)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("File created successfully")),
    ))
}

/// 整体替换文件内容。
async fn update_file(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateFileRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(name) = path?;
    let Json(request) = body?;
    state.store.update(&name, &request.content)?;
    Ok(Json(MessageResponse::new("File updated successfully")))
}

/// 删除文件。
async fn delete_file(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(name) = path?;
    state.store.delete(&name)?;
    Ok(Json(MessageResponse::new("File deleted successfully")))
}
