//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod chat_completion;
mod chat_history;
mod classifier;
mod image_generation;
mod llm;
mod media_playback;
mod os_automation;
mod search;
mod speech;
mod status_store;
mod ui;

pub use chat_completion::ChatCompletionPort;
pub use chat_history::{ChatHistoryPort, HistoryError};
pub use classifier::ClassifierPort;
pub use image_generation::{ImageError, ImageGenerationPort, ImageOutcome};
pub use llm::{LlmError, LlmPort};
pub use media_playback::{MediaPlaybackPort, PlaybackError};
pub use os_automation::{AutomationError, OsAutomationPort};
pub use search::{format_search_results, SearchError, SearchHit, SearchPort};
pub use speech::{SpeechError, SpeechInputPort, SpeechOutputPort};
pub use status_store::{StatusStoreError, StatusStorePort};
pub use ui::UiPort;
