//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod memory;
pub mod persistence;
pub mod ui;
pub mod worker;

pub use memory::{InMemoryChatHistory, InMemoryStatusStore};
pub use ui::{QueueingUi, ShellView, TerminalRenderer, WorkQueue};
pub use worker::{ImageWorker, ImageWorkerConfig};
