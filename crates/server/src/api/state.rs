//! 统一的应用状态。

use text_editor_file_store::FileStore;

/// 统一的应用状态，包含所有 handler 共享的数据。
#[derive(Clone)]
pub struct AppState {
    /// 受管目录上的文件存储。
    pub store: FileStore,
}

impl AppState {
    /// 创建新的应用状态。
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }
}
