//! Mailbox Image Generator - 状态记录的生产者一侧
//!
//! 1. 等待信箱空闲（有界轮询）
//! 2. 写入 `(prompt, True, seq + 1)`
//! 3. 可选：等待 worker 把记录复位为空闲且 `seq >= 自己的 seq`
//!
//! 旧版 worker 复位时写入两段格式（seq 为 0），同样视为确认

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::application::ports::{
    ImageError, ImageGenerationPort, ImageOutcome, StatusStoreError, StatusStorePort,
};
use crate::domain::StatusRecord;

/// 生产者配置
#[derive(Debug, Clone)]
pub struct MailboxConfig {
    /// 轮询间隔
    pub poll_interval: Duration,
    /// 等待信箱空闲的上限
    pub slot_timeout: Duration,
    /// 等待 worker 确认的上限；为零时写入后立即返回
    pub ack_timeout: Duration,
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            slot_timeout: Duration::from_secs(30),
            ack_timeout: Duration::from_secs(180),
        }
    }
}

pub struct MailboxImageGenerator {
    store: Arc<dyn StatusStorePort>,
    config: MailboxConfig,
}

impl MailboxImageGenerator {
    pub fn new(store: Arc<dyn StatusStorePort>, config: MailboxConfig) -> Self {
        Self { store, config }
    }

    /// 等待信箱空闲，返回当前序列号
    async fn wait_for_slot(&self) -> Result<u64, ImageError> {
        let deadline = Instant::now() + self.config.slot_timeout;

        loop {
            match self.store.read().await {
                Ok(record) if !record.ready => return Ok(record.seq),
                Ok(record) => {
                    tracing::debug!(pending = %record.prompt, seq = record.seq, "Image slot busy");
                }
                // 缺失或损坏的记录视为空闲
                Err(StatusStoreError::NotFound) | Err(StatusStoreError::Malformed(_)) => return Ok(0),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read status record");
                }
            }

            if Instant::now() >= deadline {
                return Err(ImageError::Timeout(
                    "the image worker to free the request slot".to_string(),
                ));
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// 等待 worker 复位记录
    async fn wait_for_ack(&self, seq: u64) -> Result<(), ImageError> {
        let deadline = Instant::now() + self.config.ack_timeout;

        loop {
            tokio::time::sleep(self.config.poll_interval).await;

            match self.store.read().await {
                Ok(record) if !record.ready && (record.seq >= seq || record.seq == 0) => {
                    return Ok(());
                }
                Ok(record) if record.ready && record.seq > seq => {
                    return Err(ImageError::MailboxError(format!(
                        "request {} was replaced by request {}",
                        seq, record.seq
                    )));
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "Status record unreadable while waiting for ack");
                }
            }

            if Instant::now() >= deadline {
                return Err(ImageError::Timeout("the image worker to finish".to_string()));
            }
        }
    }

    /// 提交请求，返回写入的序列号
    pub async fn submit(&self, prompt: &str) -> Result<u64, ImageError> {
        let current = self.wait_for_slot().await?;
        let seq = current + 1;

        self.store
            .write(&StatusRecord::requested(prompt, seq))
            .await
            .map_err(|e| {
                tracing::error!(prompt = %prompt, seq = seq, error = %e, "Failed to write image request");
                ImageError::MailboxError(e.to_string())
            })?;

        tracing::info!(prompt = %prompt, seq = seq, "Image request handed to worker");
        Ok(seq)
    }
}

#[async_trait]
impl ImageGenerationPort for MailboxImageGenerator {
    async fn generate(&self, prompt: &str) -> ImageOutcome {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return ImageOutcome::failed("Empty image prompt");
        }

        let seq = match self.submit(prompt).await {
            Ok(seq) => seq,
            Err(e) => return e.into(),
        };

        if self.config.ack_timeout.is_zero() {
            return ImageOutcome::saved(None);
        }

        match self.wait_for_ack(seq).await {
            Ok(()) => {
                tracing::info!(seq = seq, "Image worker acknowledged request");
                ImageOutcome::saved(None)
            }
            Err(e) => {
                tracing::warn!(seq = seq, error = %e, "Image request not acknowledged");
                e.into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryStatusStore;

    fn fast_config(ack_timeout_ms: u64) -> MailboxConfig {
        MailboxConfig {
            poll_interval: Duration::from_millis(5),
            slot_timeout: Duration::from_millis(60),
            ack_timeout: Duration::from_millis(ack_timeout_ms),
        }
    }

    #[tokio::test]
    async fn test_submit_without_ack() {
        let store = Arc::new(InMemoryStatusStore::with_record(&StatusRecord::idle(4)));
        let generator = MailboxImageGenerator::new(store.clone(), fast_config(0));

        let outcome = generator.generate("draw a dog").await;

        assert!(outcome.saved);
        assert_eq!(store.read().await.unwrap(), StatusRecord::requested("draw a dog", 5));
    }

    #[tokio::test]
    async fn test_missing_record_starts_at_one() {
        let store = Arc::new(InMemoryStatusStore::new());
        let generator = MailboxImageGenerator::new(store.clone(), fast_config(0));

        assert_eq!(generator.submit("sunset").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_waits_for_worker_ack() {
        let store = Arc::new(InMemoryStatusStore::with_record(&StatusRecord::idle(0)));
        let generator = MailboxImageGenerator::new(store.clone(), fast_config(1000));

        let worker_store = store.clone();
        let worker = tokio::spawn(async move {
            loop {
                if let Ok(record) = worker_store.read().await {
                    if record.ready {
                        worker_store.clear_if_seq(record.seq).await.unwrap();
                        return record;
                    }
                }
                tokio::time::sleep(Duration::from_millis(3)).await;
            }
        });

        let outcome = generator.generate("draw a dog").await;
        let handled = worker.await.unwrap();

        assert!(outcome.saved, "{:?}", outcome.error);
        assert_eq!(handled, StatusRecord::requested("draw a dog", 1));
        assert_eq!(store.read().await.unwrap(), StatusRecord::idle(1));
    }

    #[tokio::test]
    async fn test_legacy_worker_reset_counts_as_ack() {
        let store = Arc::new(InMemoryStatusStore::with_record(&StatusRecord::idle(2)));
        let generator = MailboxImageGenerator::new(store.clone(), fast_config(1000));

        let worker_store = store.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            worker_store.set_raw("False,False");
        });

        assert!(generator.generate("draw a dog").await.saved);
    }

    #[tokio::test]
    async fn test_busy_slot_times_out() {
        let store = Arc::new(InMemoryStatusStore::with_record(&StatusRecord::requested(
            "older", 9,
        )));
        let generator = MailboxImageGenerator::new(store.clone(), fast_config(0));

        let outcome = generator.generate("draw a dog").await;

        assert!(!outcome.saved);
        assert!(outcome.error.unwrap().contains("free the request slot"));
        // 原请求不被覆盖
        assert_eq!(store.read().await.unwrap(), StatusRecord::requested("older", 9));
    }

    #[tokio::test]
    async fn test_unacknowledged_request_times_out() {
        let store = Arc::new(InMemoryStatusStore::with_record(&StatusRecord::idle(0)));
        let generator = MailboxImageGenerator::new(store.clone(), fast_config(30));

        let outcome = generator.generate("draw a dog").await;

        assert!(!outcome.saved);
        assert!(outcome.error.unwrap().contains("finish"));
    }
}
