//! Fake LLM Client - 用于测试的模型客户端
//!
//! 按顺序返回预设回答（最后一条会重复使用），并记录收到的请求

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::application::ports::{LlmError, LlmPort};
use crate::domain::ChatMessage;

pub struct FakeLlmClient {
    replies: Mutex<VecDeque<String>>,
    failure: Option<String>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl FakeLlmClient {
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 每次调用都返回服务错误
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            failure: Some(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 已收到的请求（按调用顺序）
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmPort for FakeLlmClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(messages.to_vec());
        }

        if let Some(message) = &self.failure {
            return Err(LlmError::ServiceError(message.clone()));
        }

        let mut replies = self
            .replies
            .lock()
            .map_err(|_| LlmError::InvalidResponse("reply queue poisoned".to_string()))?;
        let reply = if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        };

        reply.ok_or_else(|| LlmError::InvalidResponse("no scripted reply".to_string()))
    }
}
