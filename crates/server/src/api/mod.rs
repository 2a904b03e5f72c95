//! API 路由模块。
//!
//! 提供文本编辑器前端所需的文件管理 API。

pub mod cors;
pub mod error;
pub mod files;
pub mod health;
pub mod state;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, middleware, routing::get};

pub use cors::build_cors_layer;
pub use error::ApiError;
pub use files::create_files_router;
pub use state::AppState;

/// 组装完整路由：健康检查、文件 API 与跨域策略。
///
/// 文件内容大小只受文件系统限制，因此关闭请求体大小限制。
pub fn create_router<S: AsRef<str>>(state: AppState, allowed_origins: &[S]) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .merge(create_files_router())
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn(cors::answer_options))
        .layer(build_cors_layer(allowed_origins))
        .with_state(Arc::new(state))
}
