//! 文本文件存储。
//!
//! 将一个固定目录下的 `.txt` 文件映射为列表、读取、创建、更新、删除操作，
//! 所有文件名在触碰文件系统之前都会经过校验。

pub mod error;
pub mod name;
pub mod store;

pub use error::{FileStoreError, Result};
pub use name::FileName;
pub use store::{FileEntry, FileStore};
