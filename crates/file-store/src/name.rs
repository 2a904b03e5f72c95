use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{FileStoreError, Result};

/// 受管文件的后缀。
pub const TEXT_SUFFIX: &str = ".txt";

/// 经过校验的文件名。
///
/// 只能通过 [`FileName::parse`] 构造：非空、以 `.txt` 结尾，且不含任何目录分隔符，
/// 因此拼接到受管目录后一定落在该目录内。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileName(String);

impl FileName {
    pub fn parse(candidate: &str) -> Result<Self> {
        if is_valid(candidate) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(FileStoreError::InvalidName(candidate.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 判断文件名是否合法。
///
/// `/` 与 `\` 都视为分隔符，与宿主平台无关。
pub fn is_valid(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate.ends_with(TEXT_SUFFIX)
        && !candidate.contains(['/', '\\'])
        && Path::new(candidate).file_name().and_then(|n| n.to_str()) == Some(candidate)
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<Path> for FileName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl FromStr for FileName {
    type Err = FileStoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
