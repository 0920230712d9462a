//! Speech Adapter - 语音输入 / 输出
//!
//! 配置了外部命令时使用命令实现，否则在启动时选择 Null 实现

mod command_speech;
mod null_speech;

pub use command_speech::{CommandSpeechInput, CommandSpeechOutput};
pub use null_speech::{NullSpeechInput, NullSpeechOutput};
