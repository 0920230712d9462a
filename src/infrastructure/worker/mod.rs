//! Worker Layer - Background Task Processing
//!
//! 实现 ImageWorker，消费状态记录中的图片生成请求

mod image_worker;

pub use image_worker::{ImageWorker, ImageWorkerConfig, PollOutcome};
