//! Chat Context - 对话记录与界面文本

mod value_objects;

pub use value_objects::{answer_modifier, ChatMessage, ChatRole, Speaker, TranscriptEntry};
