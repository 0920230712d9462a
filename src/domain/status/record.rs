//! Status Record - 状态记录值对象
//!
//! 单行格式：`<prompt>,<ready>,<seq>`
//!
//! - `ready` 写入为 `True` / `False`，读取时不区分大小写
//! - 兼容旧的两段格式 `<prompt>,<ready>`（seq 视为 0）
//! - 从右向左切分，prompt 中可以包含逗号

use serde::{Deserialize, Serialize};

use super::StatusRecordError;

/// 记录状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    /// 空闲（ready=false）
    Idle,
    /// 已请求（ready=true）
    Requested,
}

impl RecordState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordState::Idle => "idle",
            RecordState::Requested => "requested",
        }
    }
}

/// 状态记录
///
/// 每次写入完整覆盖上一次的状态（last-writer-wins）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub prompt: String,
    pub ready: bool,
    /// 请求序列号，每次新请求递增，消费者只在序列号未变时清空
    pub seq: u64,
}

impl Default for StatusRecord {
    fn default() -> Self {
        Self::idle(0)
    }
}

impl StatusRecord {
    /// 空闲记录
    pub fn idle(seq: u64) -> Self {
        Self {
            prompt: String::new(),
            ready: false,
            seq,
        }
    }

    /// 新请求记录
    pub fn requested(prompt: impl Into<String>, seq: u64) -> Self {
        Self {
            prompt: prompt.into(),
            ready: true,
            seq,
        }
    }

    pub fn state(&self) -> RecordState {
        if self.ready {
            RecordState::Requested
        } else {
            RecordState::Idle
        }
    }

    pub fn is_requested(&self) -> bool {
        self.ready
    }

    /// 序列化为单行文本
    ///
    /// 换行符会被替换为空格，保证记录始终只有一行
    pub fn to_line(&self) -> String {
        let prompt: String = self
            .prompt
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        let ready = if self.ready { "True" } else { "False" };
        format!("{},{},{}", prompt, ready, self.seq)
    }

    /// 从单行文本解析
    pub fn parse(line: &str) -> Result<Self, StatusRecordError> {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            return Err(StatusRecordError::Empty);
        }

        let (head, last) = line
            .rsplit_once(',')
            .ok_or_else(|| StatusRecordError::MissingSeparator(line.to_string()))?;

        // 旧格式: <prompt>,<ready>
        if let Some(ready) = parse_ready(last) {
            return Ok(Self {
                prompt: head.to_string(),
                ready,
                seq: 0,
            });
        }

        // 新格式: <prompt>,<ready>,<seq>
        let seq: u64 = last
            .trim()
            .parse()
            .map_err(|_| StatusRecordError::InvalidSequence(last.to_string()))?;
        let (prompt, ready) = head
            .rsplit_once(',')
            .ok_or_else(|| StatusRecordError::MissingSeparator(line.to_string()))?;
        let ready =
            parse_ready(ready).ok_or_else(|| StatusRecordError::InvalidReadyFlag(ready.to_string()))?;

        Ok(Self {
            prompt: prompt.to_string(),
            ready,
            seq,
        })
    }
}

fn parse_ready(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl std::fmt::Display for StatusRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_line())
    }
}
