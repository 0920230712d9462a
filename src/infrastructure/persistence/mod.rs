//! Persistence Layer - 数据持久化
//!
//! JSON 文件、纯文本文件和 SQLite 存储实现

pub mod file;
pub mod json;
pub mod sqlite;

pub use file::FileStatusStore;
pub use json::JsonFileChatHistory;
pub use sqlite::{create_pool, run_migrations, DatabaseConfig, DbPool, SqliteChatHistory};
