//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Intent Context: 决策字符串 → 类型化意图
//! - Status Context: 跨进程图片请求状态记录
//! - Chat Context: 对话记录与界面文本

pub mod chat;
pub mod intent;
pub mod status;

pub use chat::{answer_modifier, ChatMessage, ChatRole, Speaker, TranscriptEntry};
pub use intent::{parse_decision, parse_decisions, Intent, IntentKind};
pub use status::{RecordState, StatusRecord, StatusRecordError};
