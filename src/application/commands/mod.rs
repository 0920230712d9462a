//! 应用层 - 命令
//!
//! 用户请求的调度入口

mod dispatch_commands;

pub mod handlers;

pub use dispatch_commands::*;
