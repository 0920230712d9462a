//! In-Memory Status Store Implementation
//!
//! 保存原始文本行，读取时解析，因此也能模拟损坏的记录

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::ports::{StatusStoreError, StatusStorePort};
use crate::domain::StatusRecord;

/// 内存状态记录
#[derive(Default)]
pub struct InMemoryStatusStore {
    line: Mutex<Option<String>>,
    writes: Mutex<usize>,
}

impl InMemoryStatusStore {
    /// 空的存储（读取返回 NotFound）
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: &StatusRecord) -> Self {
        Self::with_raw(record.to_line())
    }

    /// 使用任意原始文本初始化
    pub fn with_raw(line: impl Into<String>) -> Self {
        Self {
            line: Mutex::new(Some(line.into())),
            writes: Mutex::new(0),
        }
    }

    /// 当前原始文本
    pub fn raw(&self) -> Option<String> {
        self.line.lock().ok().and_then(|l| l.clone())
    }

    /// 覆盖原始文本（不计入写入次数）
    pub fn set_raw(&self, line: impl Into<String>) {
        if let Ok(mut current) = self.line.lock() {
            *current = Some(line.into());
        }
    }

    /// 通过 `write` 写入的次数
    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or_default()
    }
}

#[async_trait]
impl StatusStorePort for InMemoryStatusStore {
    async fn read(&self) -> Result<StatusRecord, StatusStoreError> {
        let line = self
            .line
            .lock()
            .map_err(|e| StatusStoreError::IoError(e.to_string()))?
            .clone()
            .ok_or(StatusStoreError::NotFound)?;

        Ok(StatusRecord::parse(&line)?)
    }

    async fn write(&self, record: &StatusRecord) -> Result<(), StatusStoreError> {
        let mut line = self
            .line
            .lock()
            .map_err(|e| StatusStoreError::IoError(e.to_string()))?;
        *line = Some(record.to_line());

        if let Ok(mut writes) = self.writes.lock() {
            *writes += 1;
        }
        Ok(())
    }
}
