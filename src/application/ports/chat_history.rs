//! Chat History Port - 对话记录存储
//!
//! 对话记录只追加；每次对话结束后整体保存（非增量）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ChatMessage;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ChatHistoryPort: Send + Sync {
    /// 读取完整的对话记录
    async fn load(&self) -> Result<Vec<ChatMessage>, HistoryError>;

    /// 用给定序列覆盖保存
    async fn save(&self, messages: &[ChatMessage]) -> Result<(), HistoryError>;

    /// 追加消息并保存完整序列
    async fn append(&self, messages: &[ChatMessage]) -> Result<(), HistoryError> {
        let mut all = self.load().await?;
        all.extend_from_slice(messages);
        self.save(&all).await
    }

    /// 清空对话记录
    async fn clear(&self) -> Result<(), HistoryError> {
        self.save(&[]).await
    }
}
