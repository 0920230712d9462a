//! UI Layer - 终端界面
//!
//! 只有 UI 循环持有 `ShellView`；调度任务通过 `QueueingUi` 投递修改，
//! UI 循环每个 tick 执行 `WorkDrainer::drain_and_run` 后渲染

mod queueing_ui;
mod shell_view;
mod terminal;
mod work_queue;

pub use queueing_ui::QueueingUi;
pub use shell_view::ShellView;
pub use terminal::TerminalRenderer;
pub use work_queue::{DrainStats, UiError, WorkDrainer, WorkItem, WorkQueue};
