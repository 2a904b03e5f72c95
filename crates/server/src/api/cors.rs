//! 跨域策略。
//!
//! 命中白名单的 `Origin` 原样回写并允许携带凭证；未命中的请求照常处理，
//! 只是不带 `Access-Control-Allow-Origin`，由浏览器拦截读取。

use axum::{
    body::Body,
    http::{HeaderValue, Method, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

/// 根据白名单构建 CORS 层，忽略无法作为请求头值的条目。
pub fn build_cors_layer<S: AsRef<str>>(allowed_origins: &[S]) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .map(|origin| origin.as_ref().trim())
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "invalid cors origin");
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// 不带 `Access-Control-Request-Method` 的 `OPTIONS` 请求不会被 CORS 层当作预检处理，
/// 这里统一应答 200。
pub async fn answer_options(request: Request<Body>, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}
