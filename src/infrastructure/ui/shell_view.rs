//! Shell View - UI 循环独占的界面状态
//!
//! 只有 UI 循环会持有 `&mut ShellView`；其他任务通过 `QueueingUi` 投递修改

use crate::domain::TranscriptEntry;

const READY: &str = "● Ready";

/// 终端界面状态
#[derive(Debug)]
pub struct ShellView {
    transcript: Vec<TranscriptEntry>,
    /// 已渲染到终端的条目数
    rendered: usize,
    status: String,
    status_dirty: bool,
    log: String,
    busy: bool,
    should_quit: bool,
}

impl Default for ShellView {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellView {
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            rendered: 0,
            status: READY.to_string(),
            status_dirty: false,
            log: "System: Ready".to_string(),
            busy: false,
            should_quit: false,
        }
    }

    pub fn append(&mut self, entry: TranscriptEntry) {
        self.transcript.push(entry);
    }

    /// 清空对话（新会话）
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.rendered = 0;
    }

    pub fn set_status(&mut self, status: String) {
        if self.status != status {
            self.status = status;
            self.status_dirty = true;
        }
    }

    pub fn set_log(&mut self, log: String) {
        self.log = log;
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.set_status(if busy { "● Processing..." } else { READY }.to_string());
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// 取出尚未渲染的条目
    pub fn take_unrendered(&mut self) -> &[TranscriptEntry] {
        let start = self.rendered.min(self.transcript.len());
        self.rendered = self.transcript.len();
        &self.transcript[start..]
    }

    /// 状态变化时返回新状态（只返回一次）
    pub fn take_status_change(&mut self) -> Option<&str> {
        if self.status_dirty {
            self.status_dirty = false;
            Some(&self.status)
        } else {
            None
        }
    }
}
