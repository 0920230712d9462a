//! Jarvis - 终端语音助手
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Intent: 决策字符串解析为意图
//! - Status: 图片请求信箱的状态记录
//! - Chat: 对话消息与界面记录
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Llm, Search, ImageGeneration, StatusStore, Ui ...）
//! - Services: 分类器、对话、实时搜索
//! - Commands: DispatchEngine 调度引擎
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: Groq/Serper/Pollinations 客户端、自动化、语音
//! - Persistence: JSON / 文本文件 / SQLite 存储
//! - Memory: 内存存储
//! - UI: WorkQueue + 终端渲染
//! - Worker: ImageWorker 图片请求消费者

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
