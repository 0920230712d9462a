//! Status Store Port - 状态记录存储
//!
//! 跨进程共享的请求信箱，文件实现在 infrastructure/persistence 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{StatusRecord, StatusRecordError};

#[derive(Debug, Error)]
pub enum StatusStoreError {
    #[error("Status record not found")]
    NotFound,

    #[error("Malformed status record: {0}")]
    Malformed(#[from] StatusRecordError),

    #[error("IO error: {0}")]
    IoError(String),
}

#[async_trait]
pub trait StatusStorePort: Send + Sync {
    /// 读取当前记录
    async fn read(&self) -> Result<StatusRecord, StatusStoreError>;

    /// 整体覆盖写入
    async fn write(&self, record: &StatusRecord) -> Result<(), StatusStoreError>;

    /// 记录不存在时初始化为空闲，返回当前记录
    async fn ensure_initialized(&self) -> Result<StatusRecord, StatusStoreError> {
        match self.read().await {
            Ok(record) => Ok(record),
            Err(StatusStoreError::NotFound) => {
                let record = StatusRecord::default();
                self.write(&record).await?;
                Ok(record)
            }
            Err(e) => Err(e),
        }
    }

    /// 仅当记录仍是序列号为 `seq` 的请求时清空为空闲
    ///
    /// 返回是否执行了清空
    async fn clear_if_seq(&self, seq: u64) -> Result<bool, StatusStoreError> {
        let current = match self.read().await {
            Ok(record) => record,
            // 记录损坏或丢失时直接复位
            Err(StatusStoreError::NotFound) | Err(StatusStoreError::Malformed(_)) => {
                self.write(&StatusRecord::idle(seq)).await?;
                return Ok(true);
            }
            Err(e) => return Err(e),
        };

        if current.ready && current.seq != seq {
            return Ok(false);
        }

        self.write(&StatusRecord::idle(current.seq.max(seq))).await?;
        Ok(true)
    }
}
