//! Status Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusRecordError {
    #[error("状态记录为空")]
    Empty,

    #[error("状态记录缺少分隔符: {0}")]
    MissingSeparator(String),

    #[error("无效的就绪标记: {0}")]
    InvalidReadyFlag(String),

    #[error("无效的序列号: {0}")]
    InvalidSequence(String),
}
