//! Work Queue - 投递到 UI 循环的延迟修改
//!
//! - `WorkQueue::enqueue` 可在任意任务/线程调用，非阻塞、无上限
//! - `WorkDrainer::drain_and_run` 只由持有它的 UI 循环调用，按 FIFO 执行
//!   开始 drain 时已排队的条目；单条失败或 panic 只记录日志，
//!   drain 期间新投递的条目留到下一个 tick
//!
//! drainer 通过 `&mut self` 独占，因此不会有两次 drain 并发执行

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tokio::sync::mpsc;

/// UI 操作错误
#[derive(Debug, Error)]
pub enum UiError {
    #[error("UI operation failed: {0}")]
    OperationFailed(String),

    #[error("UI is closed")]
    Closed,
}

type WorkFn<S> = Box<dyn FnOnce(&mut S) -> Result<(), UiError> + Send + 'static>;

/// 延迟执行的 UI 修改
pub struct WorkItem<S> {
    label: &'static str,
    op: WorkFn<S>,
}

impl<S> WorkItem<S> {
    pub fn new<F>(label: &'static str, op: F) -> Self
    where
        F: FnOnce(&mut S) -> Result<(), UiError> + Send + 'static,
    {
        Self {
            label,
            op: Box::new(op),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    fn run(self, state: &mut S) -> Result<(), UiError> {
        (self.op)(state)
    }
}

impl<S> std::fmt::Debug for WorkItem<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkItem").field("label", &self.label).finish()
    }
}

/// 生产端（可克隆）
pub struct WorkQueue<S> {
    sender: mpsc::UnboundedSender<WorkItem<S>>,
}

impl<S> Clone for WorkQueue<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: 'static> WorkQueue<S> {
    /// 创建队列，返回生产端与唯一的消费端
    pub fn new() -> (Self, WorkDrainer<S>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, WorkDrainer { receiver })
    }

    /// 投递一条修改；UI 已关闭时丢弃并返回错误
    pub fn enqueue(&self, item: WorkItem<S>) -> Result<(), UiError> {
        let label = item.label;
        self.sender.send(item).map_err(|_| {
            tracing::debug!(label = label, "UI closed, dropping work item");
            UiError::Closed
        })
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// 单次 drain 的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainStats {
    pub executed: usize,
    /// 返回错误或 panic 的条目数
    pub failed: usize,
}

/// 消费端，只属于 UI 循环
pub struct WorkDrainer<S> {
    receiver: mpsc::UnboundedReceiver<WorkItem<S>>,
}

impl<S> WorkDrainer<S> {
    /// 按 FIFO 执行开始时已排队的条目
    pub fn drain_and_run(&mut self, state: &mut S) -> DrainStats {
        let mut stats = DrainStats::default();
        let pending = self.receiver.len();

        for _ in 0..pending {
            let Ok(item) = self.receiver.try_recv() else {
                break;
            };
            let label = item.label;
            stats.executed += 1;

            match panic::catch_unwind(AssertUnwindSafe(|| item.run(state))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    stats.failed += 1;
                    tracing::error!(label = label, error = %e, "UI queue item error");
                }
                Err(payload) => {
                    stats.failed += 1;
                    tracing::error!(
                        label = label,
                        panic = %panic_message(payload.as_ref()),
                        "UI queue item panicked"
                    );
                }
            }
        }

        stats
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
