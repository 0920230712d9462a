//! Status Context - 跨进程图片请求信箱
//!
//! 生产者（助手）与独立消费者进程（图片 Worker）之间共享的状态记录

mod errors;
mod record;

pub use errors::StatusRecordError;
pub use record::{RecordState, StatusRecord};
