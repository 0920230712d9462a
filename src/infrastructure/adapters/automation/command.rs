//! Automation Command - 自动化命令解析

use crate::application::ports::AutomationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomationCommand {
    Open(String),
    Close(String),
    GoogleSearch(String),
    YoutubeSearch(String),
    /// 由模型撰写内容并保存为文本文件
    Content(String),
    /// 音量等系统操作
    System(String),
}

impl AutomationCommand {
    /// 解析 `open x` / `close x` / `google search x` / `youtube search x` /
    /// `content x` / `system x`，前缀不区分大小写
    pub fn parse(raw: &str) -> Result<Self, AutomationError> {
        let trimmed = raw.trim();
        let lower = trimmed.to_lowercase();

        let table: [(&str, fn(String) -> Self); 6] = [
            ("google search ", AutomationCommand::GoogleSearch),
            ("youtube search ", AutomationCommand::YoutubeSearch),
            ("open ", AutomationCommand::Open),
            ("close ", AutomationCommand::Close),
            ("content ", AutomationCommand::Content),
            ("system ", AutomationCommand::System),
        ];

        for (prefix, build) in table {
            if lower.starts_with(prefix) {
                // 前缀均为 ASCII，按字节切分安全
                let argument = trimmed[prefix.len()..].trim();
                if argument.is_empty() {
                    break;
                }
                return Ok(build(argument.to_string()));
            }
        }

        Err(AutomationError::Unsupported(trimmed.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            AutomationCommand::Open(_) => "open",
            AutomationCommand::Close(_) => "close",
            AutomationCommand::GoogleSearch(_) => "google search",
            AutomationCommand::YoutubeSearch(_) => "youtube search",
            AutomationCommand::Content(_) => "content",
            AutomationCommand::System(_) => "system",
        }
    }
}
