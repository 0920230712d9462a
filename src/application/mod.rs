//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Llm、Search、ImageGeneration、StatusStore、Ui 等）
//! - services: 分类器、对话、实时搜索等协作者
//! - commands: 请求调度引擎
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod services;

pub use commands::{
    handlers::{AssistantContext, DispatchConfig, DispatchEngine},
    DispatchReport, IntentOutcome,
};

pub use error::ApplicationError;

pub use services::{AssistantProfile, ChatbotService, LlmClassifier, RealtimeSearchEngine};
