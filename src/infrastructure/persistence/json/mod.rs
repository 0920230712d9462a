//! JSON 文件持久化

mod chat_log;

pub use chat_log::JsonFileChatHistory;
