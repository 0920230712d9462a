//! In-Memory Chat History Implementation

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::ports::{ChatHistoryPort, HistoryError};
use crate::domain::ChatMessage;

/// 内存对话记录
#[derive(Default)]
pub struct InMemoryChatHistory {
    messages: RwLock<Vec<ChatMessage>>,
}

impl InMemoryChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages: RwLock::new(messages),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl ChatHistoryPort for InMemoryChatHistory {
    async fn load(&self) -> Result<Vec<ChatMessage>, HistoryError> {
        Ok(self.messages.read().await.clone())
    }

    async fn save(&self, messages: &[ChatMessage]) -> Result<(), HistoryError> {
        *self.messages.write().await = messages.to_vec();
        tracing::debug!(count = messages.len(), "Chat history saved in memory");
        Ok(())
    }
}
