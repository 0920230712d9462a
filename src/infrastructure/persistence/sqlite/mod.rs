//! SQLite Persistence - SQLite 数据库持久化实现

mod chat_history_repo;
mod database;

pub use chat_history_repo::*;
pub use database::*;
