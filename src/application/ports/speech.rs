//! Speech Ports - 语音输入 / 输出

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Speech backend unavailable: {0}")]
    Unavailable(String),

    #[error("Speech command failed: {0}")]
    CommandFailed(String),
}

/// 语音识别
#[async_trait]
pub trait SpeechInputPort: Send + Sync {
    /// 没有识别到内容时返回 `Ok(None)`
    async fn recognize(&self) -> Result<Option<String>, SpeechError>;
}

/// 语音合成播报
#[async_trait]
pub trait SpeechOutputPort: Send + Sync {
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;
}
