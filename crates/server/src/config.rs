use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::info;
type Result<T> = anyhow::Result<T>;

/// 默认配置文件路径。
pub const DEFAULT_CONFIG_PATH: &str = "server.toml";
/// 覆盖配置文件路径的环境变量。
pub const CONFIG_PATH_ENV: &str = "TEXT_EDITOR_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_managed_dir")]
    pub managed_dir: PathBuf,
    #[serde(default = "default_seed_example")]
    pub seed_example: bool,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub tls: TlsConfig,
}

impl ServerConfig {
    /// 按 `TEXT_EDITOR_CONFIG` 或 `server.toml` 加载配置，文件不存在时使用默认值。
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_or_default(path)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            info!(path = %path.display(), "loading server config");
            Self::from_file(path)
        } else {
            info!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize server config")
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address: {}:{}", self.host, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            managed_dir: default_managed_dir(),
            seed_example: default_seed_example(),
            allowed_origins: default_allowed_origins(),
            tls: TlsConfig::default(),
        }
    }
}

/// 证书与私钥路径（PEM）。
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TlsConfig {
    #[serde(default = "default_cert_path")]
    pub cert_path: PathBuf,
    #[serde(default = "default_key_path")]
    pub key_path: PathBuf,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: default_cert_path(),
            key_path: default_key_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9527
}

fn default_managed_dir() -> PathBuf {
    PathBuf::from("managed_files")
}

fn default_seed_example() -> bool {
    true
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "https://text-editor-app.vercel.app".to_string(),
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

fn default_cert_path() -> PathBuf {
    PathBuf::from("cert/localhost.pem")
}

fn default_key_path() -> PathBuf {
    PathBuf::from("cert/localhost-key.pem")
}
