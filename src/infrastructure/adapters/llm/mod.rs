//! LLM Adapter - OpenAI 兼容的对话补全客户端

mod fake_llm_client;
mod openai_client;

pub use fake_llm_client::FakeLlmClient;
pub use openai_client::*;
