//! Chat Completion Port - 问答协作者
//!
//! 普通对话与实时搜索引擎都实现此接口：输入一句提问，输出一段回答

use async_trait::async_trait;

use crate::application::error::ApplicationError;

#[async_trait]
pub trait ChatCompletionPort: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ApplicationError>;
}
