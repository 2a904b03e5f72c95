use thiserror::Error;

/// 文件存储错误类型。
#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("无效的文件名: {0:?}")]
    InvalidName(String),

    #[error("文件不存在: {0}")]
    NotFound(String),

    #[error("文件已存在: {0}")]
    AlreadyExists(String),

    #[error("存储不可用 ({action}): {source}")]
    StoreUnavailable {
        /// 失败的操作，例如 "read file"。
        action: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl FileStoreError {
    pub(crate) fn unavailable(action: &'static str, source: std::io::Error) -> Self {
        Self::StoreUnavailable { action, source }
    }
}

pub type Result<T> = std::result::Result<T, FileStoreError>;
