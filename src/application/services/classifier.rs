//! Decision-Making Classifier - 基于模型的意图分类
//!
//! 让模型把用户输入改写为逗号分隔的决策列表，再过滤掉不认识的条目

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ClassifierPort, LlmPort};
use crate::domain::ChatMessage;

/// 可识别的决策关键字
const FUNCTION_KEYWORDS: &[&str] = &[
    "exit",
    "general",
    "realtime",
    "open",
    "close",
    "play",
    "generate image",
    "system",
    "content",
    "google search",
    "youtube search",
];

const PREAMBLE: &str = "You are a very accurate Decision-Making Model, which decides what kind of a query is given to you.\n\
You will decide whether a query is a 'general' query, a 'realtime' query, or is asking to perform any task or automation like 'open facebook, instagram', 'can you write a application and open it in notepad'.\n\
*** Do not answer any query, just decide what kind of query is given to you. ***\n\
-> Respond with 'general ( query )' if a query can be answered by a llm model (conversational ai chatbot) and doesn't require any up to date information.\n\
-> Respond with 'realtime ( query )' if a query can not be answered by a llm model (because they don't have realtime data) and requires up to date information.\n\
-> Respond with 'open (application name or website name)' if a query is asking to open any application.\n\
-> Respond with 'close (application name)' if a query is asking to close any application.\n\
-> Respond with 'play (song name)' if a query is asking to play any song.\n\
-> Respond with 'generate image (image prompt)' if a query is requesting to generate a image with given prompt.\n\
-> Respond with 'system (task name)' if a query is asking to mute, unmute, volume up, volume down, etc.\n\
-> Respond with 'content (topic)' if a query is asking to write any type of content like application, codes, emails or anything else about a specific topic.\n\
-> Respond with 'google search (topic)' if a query is asking to search a specific topic on google.\n\
-> Respond with 'youtube search (topic)' if a query is asking to search a specific topic on youtube.\n\
*** If the query is asking to perform multiple tasks, respond with each task separated by a comma, like 'open facebook, open telegram'. ***\n\
*** If the user is saying goodbye or wants to end the conversation, respond with 'exit'. ***\n\
*** Respond with 'general (query)' if you can't decide the kind of query or if a query is asking to perform a task which is not mentioned above. ***";

pub struct LlmClassifier {
    llm: Arc<dyn LlmPort>,
}

impl LlmClassifier {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self { llm }
    }
}

/// 把模型输出拆成决策列表，只保留以已知关键字开头的条目
pub fn filter_decisions(response: &str) -> Vec<String> {
    response
        .replace('\n', "")
        .split(',')
        .map(|task| task.trim())
        .filter(|task| {
            FUNCTION_KEYWORDS
                .iter()
                .any(|keyword| task.starts_with(keyword))
        })
        .map(|task| task.to_string())
        .collect()
}

#[async_trait]
impl ClassifierPort for LlmClassifier {
    async fn classify(&self, query: &str) -> Result<Vec<String>, ApplicationError> {
        let request = vec![ChatMessage::system(PREAMBLE), ChatMessage::user(query)];

        let response = self
            .llm
            .chat(&request)
            .await
            .map_err(|e| ApplicationError::classification(e.to_string()))?;

        let decisions = filter_decisions(&response);
        if decisions.is_empty() {
            tracing::warn!(
                query = %query,
                output = %response.trim(),
                "No recognizable task in model output"
            );
        }

        tracing::debug!(query = %query, decisions = ?decisions, "Query classified");
        Ok(decisions)
    }
}
