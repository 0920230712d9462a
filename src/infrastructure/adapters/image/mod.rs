//! Image Adapter - 图片生成
//!
//! - `PollinationsImageClient`: 直接请求并保存图片
//! - `MailboxImageGenerator`: 通过状态记录交给 image worker 进程

mod mailbox_generator;
mod pollinations_client;

pub use mailbox_generator::*;
pub use pollinations_client::*;
