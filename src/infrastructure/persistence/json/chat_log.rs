//! JSON Chat Log - 对话记录文件
//!
//! 文件内容为 `[{"role": "...", "content": "..."}, ...]`，
//! 每次保存整体重写（缩进 4 空格）。文件不存在时视为空记录

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::application::ports::{ChatHistoryPort, HistoryError};
use crate::domain::ChatMessage;

use crate::infrastructure::persistence::file::write_atomic;

pub struct JsonFileChatHistory {
    path: PathBuf,
}

impl JsonFileChatHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 文件不存在时创建空记录
    pub async fn ensure_exists(&self) -> Result<(), HistoryError> {
        if tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| HistoryError::IoError(e.to_string()))?
        {
            return Ok(());
        }
        self.save(&[]).await
    }
}

fn to_pretty_json(messages: &[ChatMessage]) -> Result<Vec<u8>, HistoryError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    messages
        .serialize(&mut serializer)
        .map_err(|e| HistoryError::SerializationError(e.to_string()))?;
    Ok(buf)
}

#[async_trait]
impl ChatHistoryPort for JsonFileChatHistory {
    async fn load(&self) -> Result<Vec<ChatMessage>, HistoryError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(HistoryError::IoError(e.to_string())),
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&content).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Chat log is not valid JSON");
            HistoryError::SerializationError(e.to_string())
        })
    }

    async fn save(&self, messages: &[ChatMessage]) -> Result<(), HistoryError> {
        let content = to_pretty_json(messages)?;
        write_atomic(&self.path, &content)
            .await
            .map_err(|e| HistoryError::IoError(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), count = messages.len(), "Chat log saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let history = JsonFileChatHistory::new(dir.path().join("ChatLog.json"));
        assert!(history.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_writes_pretty_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Data").join("ChatLog.json");
        let history = JsonFileChatHistory::new(&path);

        history
            .append(&[ChatMessage::user("hi"), ChatMessage::assistant("hello")])
            .await
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n    {\n        \"role\": \"user\""));
        assert_eq!(history.load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_reads_existing_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ChatLog.json");
        std::fs::write(
            &path,
            r#"[{"role": "user", "content": "who are you"}, {"role": "assistant", "content": "Jarvis"}]"#,
        )
        .unwrap();

        let history = JsonFileChatHistory::new(&path);
        let messages = history.load().await.unwrap();
        assert_eq!(messages[1], ChatMessage::assistant("Jarvis"));
    }

    #[tokio::test]
    async fn test_corrupt_log_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ChatLog.json");
        std::fs::write(&path, "{not json").unwrap();

        let history = JsonFileChatHistory::new(&path);
        assert!(matches!(
            history.load().await,
            Err(HistoryError::SerializationError(_))
        ));
    }

    #[tokio::test]
    async fn test_ensure_exists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ChatLog.json");
        let history = JsonFileChatHistory::new(&path);

        history.ensure_exists().await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
