//! Queueing UI - 基于 WorkQueue 的 UiPort 实现
//!
//! 每个调用都转换为一个 WorkItem，由 UI 循环在下一个 tick 执行

use crate::application::ports::UiPort;
use crate::domain::{Speaker, TranscriptEntry};

use super::shell_view::ShellView;
use super::work_queue::{WorkItem, WorkQueue};

#[derive(Clone)]
pub struct QueueingUi {
    queue: WorkQueue<ShellView>,
}

impl QueueingUi {
    pub fn new(queue: WorkQueue<ShellView>) -> Self {
        Self { queue }
    }

    /// 清空对话并显示欢迎语
    pub fn clear_chat(&self) {
        self.post(WorkItem::new("clear_chat", |view: &mut ShellView| {
            view.clear();
            view.append(TranscriptEntry::new(
                Speaker::System,
                "New chat started. How can I help you today?",
            ));
            Ok(())
        }));
    }

    fn post(&self, item: WorkItem<ShellView>) {
        // UI 已退出时丢弃即可
        let _ = self.queue.enqueue(item);
    }
}

impl UiPort for QueueingUi {
    fn append_chat(&self, speaker: Speaker, text: String) {
        // 时间戳取投递时刻
        let entry = TranscriptEntry::new(speaker, text);
        self.post(WorkItem::new("append_chat", move |view: &mut ShellView| {
            view.append(entry);
            Ok(())
        }));
    }

    fn set_status(&self, text: &str) {
        let status = format!("● {}", text);
        self.post(WorkItem::new("set_status", move |view: &mut ShellView| {
            view.set_status(status);
            Ok(())
        }));
    }

    fn set_log(&self, text: &str) {
        let log = format!("System: {}", text);
        self.post(WorkItem::new("set_log", move |view: &mut ShellView| {
            view.set_log(log);
            Ok(())
        }));
    }

    fn show_progress(&self, busy: bool) {
        self.post(WorkItem::new("show_progress", move |view: &mut ShellView| {
            view.set_busy(busy);
            Ok(())
        }));
    }

    fn request_shutdown(&self) {
        self.post(WorkItem::new("request_shutdown", |view: &mut ShellView| {
            view.request_quit();
            Ok(())
        }));
    }
}
