//! 受管目录上的文件操作。
//!
//! 不缓存任何状态，每次调用都重新读取目录或文件；并发写同一文件时以最后完成的写入为准。

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{FileStoreError, Result};
use crate::name::{FileName, TEXT_SUFFIX};

/// 首次启动时写入的示例文件名。
pub const EXAMPLE_FILE_NAME: &str = "example.txt";

const EXAMPLE_FILE_CONTENT: &str = "# Welcome to the text editor\n\n\
This is an example file. You can:\n\
- create new files\n\
- edit existing files\n\
- delete files\n\
- browse all text files";

/// 列表中的文件元数据。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// 文件名（不含目录）。
    pub name: String,
    /// 文件大小（字节）。
    pub size: u64,
    /// 最后修改时间。
    pub modified: DateTime<Utc>,
}

/// 单一受管目录上的文本文件存储。
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// 以给定目录作为受管目录创建存储实例，不访问文件系统。
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 受管目录不存在时创建它。
    pub fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .map_err(|e| FileStoreError::unavailable("create managed directory", e))
    }

    fn path_of(&self, name: &FileName) -> PathBuf {
        self.root.join(name)
    }

    /// 列出受管目录中所有 `.txt` 文件，顺序与目录遍历顺序一致。
    pub fn list(&self) -> Result<Vec<FileEntry>> {
        let entries =
            fs::read_dir(&self.root).map_err(|e| FileStoreError::unavailable("read files", e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FileStoreError::unavailable("read files", e))?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !name.ends_with(TEXT_SUFFIX) {
                continue;
            }

            // 遍历与 stat 之间文件可能已被删除
            match entry_to_info(&entry, name) {
                Ok(Some(info)) => files.push(info),
                Ok(None) => {}
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "skipping unreadable entry")
                }
            }
        }

        debug!(root = %self.root.display(), count = files.len(), "listed files");
        Ok(files)
    }

    /// 读取文件全部内容，非 UTF-8 字节以替换字符代替。
    pub fn read(&self, name: &str) -> Result<String> {
        let name = FileName::parse(name)?;
        let bytes = fs::read(self.path_of(&name)).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FileStoreError::NotFound(name.to_string()),
            _ => FileStoreError::unavailable("read file", e),
        })?;

        debug!(file = %name, size = bytes.len(), "read file");
        Ok(String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
    }

    /// 创建新文件；同名文件已存在时失败。
    pub fn create(&self, name: &str, content: &str) -> Result<()> {
        let name = FileName::parse(name)?;
        let path = self.path_of(&name);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => FileStoreError::AlreadyExists(name.to_string()),
                _ => FileStoreError::unavailable("create file", e),
            })?;
        write_new_file(file, &path, content)
            .map_err(|e| FileStoreError::unavailable("create file", e))?;

        info!(file = %name, size = content.len(), "created file");
        Ok(())
    }

    /// 整体替换已有文件的内容；文件不存在时失败且不会创建它。
    pub fn update(&self, name: &str, content: &str) -> Result<()> {
        let name = FileName::parse(name)?;
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(self.path_of(&name))
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => FileStoreError::NotFound(name.to_string()),
                _ => FileStoreError::unavailable("update file", e),
            })?;
        file.write_all(content.as_bytes())
            .map_err(|e| FileStoreError::unavailable("update file", e))?;

        info!(file = %name, size = content.len(), "updated file");
        Ok(())
    }

    /// 删除文件，不可恢复。
    pub fn delete(&self, name: &str) -> Result<()> {
        let name = FileName::parse(name)?;
        fs::remove_file(self.path_of(&name)).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FileStoreError::NotFound(name.to_string()),
            _ => FileStoreError::unavailable("delete file", e),
        })?;

        info!(file = %name, "deleted file");
        Ok(())
    }

    /// 受管目录为空时写入示例文件，返回是否写入。
    pub fn seed_example(&self) -> Result<bool> {
        let mut entries = fs::read_dir(&self.root)
            .map_err(|e| FileStoreError::unavailable("read files", e))?;
        if entries.next().is_some() {
            return Ok(false);
        }

        match self.create(EXAMPLE_FILE_NAME, EXAMPLE_FILE_CONTENT) {
            Ok(()) => Ok(true),
            Err(FileStoreError::AlreadyExists(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// 写入新建的文件；写入失败时删除该文件，同名文件之后仍可重新创建。
fn write_new_file(mut file: impl Write, path: &Path, content: &str) -> std::io::Result<()> {
    let Err(err) = file.write_all(content.as_bytes()) else {
        return Ok(());
    };
    drop(file);
    if let Err(remove_err) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %remove_err, "failed to remove partial file");
    }
    Err(err)
}

/// 将目录条目转换为元数据；条目已消失或不是普通文件时返回 `None`。
fn entry_to_info(entry: &fs::DirEntry, name: String) -> std::io::Result<Option<FileEntry>> {
    let metadata = match fs::metadata(entry.path()) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    if !metadata.is_file() {
        return Ok(None);
    }

    Ok(Some(FileEntry {
        name,
        size: metadata.len(),
        modified: DateTime::<Utc>::from(metadata.modified()?),
    }))
}
