use anyhow::Context;
use text_editor_server::{ServerConfig, app};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting text editor file server");
    let config = ServerConfig::load().context("failed to load server config")?;
    info!(
        port = config.port,
        managed_dir = %config.managed_dir.display(),
        "server config loaded"
    );

    app::run(config).await
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
