//! Memory Layer - 内存实现
//!
//! 对话记录与状态记录的内存版本，用于测试和 `chat_log.backend = "memory"`

mod chat_history;
mod status_store;

pub use chat_history::InMemoryChatHistory;
pub use status_store::InMemoryStatusStore;
