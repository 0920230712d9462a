//! File Status Store - 状态记录文件
//!
//! 单行文本，整体覆盖写入；读取时不存在返回 NotFound，空内容返回 Malformed

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::atomic::write_atomic;
use crate::application::ports::{StatusStoreError, StatusStorePort};
use crate::domain::StatusRecord;

pub struct FileStatusStore {
    path: PathBuf,
}

impl FileStatusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StatusStorePort for FileStatusStore {
    async fn read(&self) -> Result<StatusRecord, StatusStoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StatusStoreError::NotFound)
            }
            Err(e) => return Err(StatusStoreError::IoError(e.to_string())),
        };

        // 只看第一行
        let line = content.lines().next().unwrap_or_default();
        Ok(StatusRecord::parse(line)?)
    }

    async fn write(&self, record: &StatusRecord) -> Result<(), StatusStoreError> {
        write_atomic(&self.path, record.to_line().as_bytes())
            .await
            .map_err(|e| StatusStoreError::IoError(e.to_string()))?;

        tracing::debug!(
            path = %self.path.display(),
            seq = record.seq,
            state = record.state().as_str(),
            "Status record written"
        );
        Ok(())
    }
}
