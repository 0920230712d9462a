//! Application Services - 协作者的应用层实现
//!
//! 基于 LlmPort / SearchPort / ChatHistoryPort 组合出分类器与问答协作者

mod chatbot;
mod classifier;
mod clock;
mod profile;
mod realtime_search;

pub use chatbot::ChatbotService;
pub use classifier::{filter_decisions, LlmClassifier};
pub use clock::{realtime_information, realtime_information_at};
pub use profile::AssistantProfile;
pub use realtime_search::RealtimeSearchEngine;
