//! Image Generation Port - 图片生成抽象
//!
//! 直接调用路径在当前任务内请求并保存图片；
//! Worker 路径通过状态记录把请求交给独立进程

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// 图片生成错误
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Mailbox error: {0}")]
    MailboxError(String),

    #[error("Timed out waiting for {0}")]
    Timeout(String),
}

/// 图片生成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOutcome {
    /// 是否已保存
    pub saved: bool,
    /// 保存路径（直接路径才有）
    pub path: Option<PathBuf>,
    /// 错误描述
    pub error: Option<String>,
}

impl ImageOutcome {
    pub fn saved(path: Option<PathBuf>) -> Self {
        Self {
            saved: true,
            path,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            saved: false,
            path: None,
            error: Some(error.into()),
        }
    }
}

impl From<ImageError> for ImageOutcome {
    fn from(err: ImageError) -> Self {
        Self::failed(err.to_string())
    }
}

/// Image Generation Port
#[async_trait]
pub trait ImageGenerationPort: Send + Sync {
    async fn generate(&self, prompt: &str) -> ImageOutcome;
}
