//! Null Speech - 未配置语音后端时的替代实现

use async_trait::async_trait;

use crate::application::ports::{SpeechError, SpeechInputPort, SpeechOutputPort};

/// 不识别任何内容
pub struct NullSpeechInput;

#[async_trait]
impl SpeechInputPort for NullSpeechInput {
    async fn recognize(&self) -> Result<Option<String>, SpeechError> {
        tracing::debug!("No speech input configured");
        Ok(None)
    }
}

/// 丢弃所有播报
pub struct NullSpeechOutput;

#[async_trait]
impl SpeechOutputPort for NullSpeechOutput {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        tracing::debug!(text_len = text.len(), "No speech output configured, skipping");
        Ok(())
    }
}
