//! Chatbot Service - 普通对话
//!
//! 读取对话记录 → 追加用户提问 → 调用模型 → 追加回答并整体保存

use async_trait::async_trait;
use std::sync::Arc;

use super::clock::realtime_information;
use super::profile::AssistantProfile;
use crate::application::error::ApplicationError;
use crate::application::ports::{ChatCompletionPort, ChatHistoryPort, LlmPort};
use crate::domain::{answer_modifier, ChatMessage};

pub struct ChatbotService {
    llm: Arc<dyn LlmPort>,
    history: Arc<dyn ChatHistoryPort>,
    profile: AssistantProfile,
}

impl ChatbotService {
    pub fn new(
        llm: Arc<dyn LlmPort>,
        history: Arc<dyn ChatHistoryPort>,
        profile: AssistantProfile,
    ) -> Self {
        Self {
            llm,
            history,
            profile,
        }
    }
}

#[async_trait]
impl ChatCompletionPort for ChatbotService {
    async fn complete(&self, prompt: &str) -> Result<String, ApplicationError> {
        let mut messages = self.history.load().await?;
        messages.push(ChatMessage::user(prompt));

        let mut request = Vec::with_capacity(messages.len() + 2);
        request.push(ChatMessage::system(self.profile.chatbot_preamble()));
        request.push(ChatMessage::system(realtime_information()));
        request.extend(messages.iter().cloned());

        let answer = self.llm.chat(&request).await?;
        let answer = answer.trim().replace("</s>", "");

        messages.push(ChatMessage::assistant(answer.clone()));
        self.history.save(&messages).await?;

        tracing::debug!(
            prompt_len = prompt.len(),
            answer_len = answer.len(),
            history_len = messages.len(),
            "Chatbot answered"
        );

        Ok(answer_modifier(&answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChatRole;
    use crate::infrastructure::adapters::FakeLlmClient;
    use crate::infrastructure::memory::InMemoryChatHistory;

    #[tokio::test]
    async fn test_complete_persists_exchange() {
        let llm = Arc::new(FakeLlmClient::with_replies(["Hello!\n\nHow can I help?</s>"]));
        let history = Arc::new(InMemoryChatHistory::new());
        let service = ChatbotService::new(llm.clone(), history.clone(), AssistantProfile::default());

        let answer = service.complete("hi there").await.unwrap();
        assert_eq!(answer, "Hello!\nHow can I help?");

        let saved = history.load().await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0], ChatMessage::user("hi there"));
        assert_eq!(saved[1].role, ChatRole::Assistant);

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0][0].role, ChatRole::System);
        assert!(requests[0][0].content.contains("Jarvis"));
        assert_eq!(requests[0].last(), Some(&ChatMessage::user("hi there")));
    }

    #[tokio::test]
    async fn test_llm_failure_leaves_history_untouched() {
        let llm = Arc::new(FakeLlmClient::failing("model offline"));
        let history = Arc::new(InMemoryChatHistory::with_messages(vec![
            ChatMessage::user("earlier"),
            ChatMessage::assistant("reply"),
        ]));
        let service = ChatbotService::new(llm, history.clone(), AssistantProfile::default());

        let result = service.complete("hello").await;
        assert!(matches!(result, Err(ApplicationError::ExternalServiceError(_))));
        assert_eq!(history.load().await.unwrap().len(), 2);
    }
}
