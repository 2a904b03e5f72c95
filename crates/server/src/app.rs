//! 服务启动：受管目录、TLS 证书与 HTTPS 监听。

use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use text_editor_file_store::FileStore;
use tracing::{error, info, warn};

use crate::api::{AppState, create_router};
use crate::config::{ServerConfig, TlsConfig};

type Result<T> = anyhow::Result<T>;

const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("GET", "/health", "Health check"),
    ("GET", "/files", "List all files"),
    ("GET", "/files/{name}", "Get file content"),
    ("POST", "/files", "Create new file"),
    ("PUT", "/files/{name}", "Update file content"),
    ("DELETE", "/files/{name}", "Delete file"),
];

/// 按配置准备存储并运行 HTTPS 服务，直到收到关闭信号。
pub async fn run(config: ServerConfig) -> Result<()> {
    let addr = config.socket_addr()?;

    let store = FileStore::new(&config.managed_dir);
    store
        .ensure_root()
        .with_context(|| format!("failed to prepare {}", config.managed_dir.display()))?;
    info!(path = %store.root().display(), "managed directory ready");

    let tls = load_tls_config(&config.tls).await?;

    if config.seed_example {
        match store.seed_example() {
            Ok(true) => info!("created sample file: example.txt"),
            Ok(false) => {}
            Err(err) => warn!(error = %err, "failed to create sample file"),
        }
    }

    let router = create_router(AppState::new(store), config.allowed_origins.as_slice());

    info!("HTTPS server running on https://{}", addr);
    for (method, path, description) in ENDPOINTS {
        info!(method, path, "{}", description);
    }
    info!(origins = ?config.allowed_origins, "CORS configured");

    serve(addr, router, tls).await
}

/// 读取证书与私钥，缺失或无法解析时返回错误，服务不会启动。
pub async fn load_tls_config(tls: &TlsConfig) -> Result<RustlsConfig> {
    info!(cert = %tls.cert_path.display(), key = %tls.key_path.display(), "loading TLS certificate");

    match RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await {
        Ok(config) => {
            info!("TLS configured successfully");
            Ok(config)
        }
        Err(err) => {
            error!(error = %err, "certificate not found or unreadable");
            warn!("generate a local certificate with mkcert, for example:");
            warn!("  mkcert -install");
            warn!(
                "  mkcert -cert-file {} -key-file {} localhost 127.0.0.1 ::1",
                tls.cert_path.display(),
                tls.key_path.display()
            );
            Err(anyhow::Error::new(err).context("failed to load TLS certificate and key"))
        }
    }
}

async fn serve(addr: std::net::SocketAddr, router: Router, tls: RustlsConfig) -> Result<()> {
    let handle = axum_server::Handle::new();
    let shutdown_handle = handle.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_handle.graceful_shutdown(Some(Duration::from_secs(10)));
    });

    axum_server::bind_rustls(addr, tls)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .with_context(|| format!("server error on {addr}"))?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
