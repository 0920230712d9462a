//! 应用层错误定义
//!
//! 统一的协作者/用例错误类型

use thiserror::Error;

use crate::application::ports::{
    AutomationError, HistoryError, ImageError, LlmError, PlaybackError, SearchError, SpeechError,
};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 意图分类失败
    #[error("Classification failed: {0}")]
    ClassificationFailed(String),

    /// 对话记录存储错误
    #[error("History error: {0}")]
    HistoryError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl ApplicationError {
    /// 创建分类失败错误
    pub fn classification(message: impl Into<String>) -> Self {
        Self::ClassificationFailed(message.into())
    }

    /// 创建外部服务错误
    pub fn external(message: impl Into<String>) -> Self {
        Self::ExternalServiceError(message.into())
    }
}

impl From<LlmError> for ApplicationError {
    fn from(err: LlmError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<SearchError> for ApplicationError {
    fn from(err: SearchError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<HistoryError> for ApplicationError {
    fn from(err: HistoryError) -> Self {
        Self::HistoryError(err.to_string())
    }
}

impl From<ImageError> for ApplicationError {
    fn from(err: ImageError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<PlaybackError> for ApplicationError {
    fn from(err: PlaybackError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<AutomationError> for ApplicationError {
    fn from(err: AutomationError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<SpeechError> for ApplicationError {
    fn from(err: SpeechError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}
