//! Realtime Search Engine - 搜索增强问答
//!
//! 流程：
//! 1. 读取对话记录并追加用户提问
//! 2. 网页搜索（失败时使用一句可读的错误提示代替结果块）
//! 3. 系统提示 + 搜索结果 + 时间信息 + 对话记录 → 模型
//! 4. 追加回答并整体保存对话记录

use async_trait::async_trait;
use std::sync::Arc;

use super::clock::realtime_information;
use super::profile::AssistantProfile;
use crate::application::error::ApplicationError;
use crate::application::ports::{ChatCompletionPort, ChatHistoryPort, LlmPort, SearchPort};
use crate::domain::{answer_modifier, ChatMessage};

const SEARCH_FAILED_NOTICE: &str = "Sorry, I encountered an error while searching.";

pub struct RealtimeSearchEngine {
    llm: Arc<dyn LlmPort>,
    search: Arc<dyn SearchPort>,
    history: Arc<dyn ChatHistoryPort>,
    profile: AssistantProfile,
}

impl RealtimeSearchEngine {
    pub fn new(
        llm: Arc<dyn LlmPort>,
        search: Arc<dyn SearchPort>,
        history: Arc<dyn ChatHistoryPort>,
        profile: AssistantProfile,
    ) -> Self {
        Self {
            llm,
            search,
            history,
            profile,
        }
    }

    /// 固定的开场对话
    fn system_chatbot(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.profile.realtime_preamble()),
            ChatMessage::user("Hi"),
            ChatMessage::assistant("Hello, how can I help you?"),
        ]
    }
}

#[async_trait]
impl ChatCompletionPort for RealtimeSearchEngine {
    async fn complete(&self, prompt: &str) -> Result<String, ApplicationError> {
        let mut messages = self.history.load().await?;
        messages.push(ChatMessage::user(prompt));

        let search_results = match self.search.search(prompt).await {
            Ok(block) => block,
            Err(e) => {
                tracing::warn!(query = %prompt, error = %e, "Web search failed");
                SEARCH_FAILED_NOTICE.to_string()
            }
        };

        let mut request = self.system_chatbot();
        request.push(ChatMessage::system(search_results));
        request.push(ChatMessage::system(realtime_information()));
        request.extend(messages.iter().cloned());

        let answer = self.llm.chat(&request).await?;
        let answer = answer.trim().replace("</s>", "");

        messages.push(ChatMessage::assistant(answer.clone()));
        self.history.save(&messages).await?;

        tracing::info!(query = %prompt, answer_len = answer.len(), "Realtime answer ready");

        Ok(answer_modifier(&answer))
    }
}
