//! 本地 HTTPS 文本文件管理服务。
//!
//! `api` 负责路由、跨域与错误映射，`app` 负责证书加载与监听，`config` 负责配置。

pub mod api;
pub mod app;
pub mod config;

pub use api::{AppState, create_router};
pub use config::ServerConfig;
