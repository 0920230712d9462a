//! Image Worker - 状态记录的消费者一侧
//!
//! 空闲时按固定间隔轮询；读到请求后生成图片，
//! 然后仅在序列号未变时把记录复位为空闲（compare-and-clear）。
//! 复位写入失败时该请求视为丢失：不再重复生成，继续按间隔轮询

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{ImageGenerationPort, StatusStoreError, StatusStorePort};
use crate::domain::StatusRecord;

/// Worker 配置
#[derive(Debug, Clone)]
pub struct ImageWorkerConfig {
    /// 轮询间隔
    pub poll_interval: Duration,
}

impl Default for ImageWorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// 单次轮询的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// 没有请求
    Idle,
    /// 记录读取失败（按空闲处理）
    Unreadable,
    /// 处理了一个请求
    Processed { seq: u64, saved: bool },
    /// 处理期间出现了更新的请求，保留给下一次轮询
    Superseded { seq: u64 },
    /// 已处理但无法复位记录，请求被放弃
    ClearFailed { seq: u64 },
    /// 记录仍是之前复位失败的请求，跳过
    Abandoned { seq: u64 },
}

/// 图片 Worker
pub struct ImageWorker {
    config: ImageWorkerConfig,
    store: Arc<dyn StatusStorePort>,
    generator: Arc<dyn ImageGenerationPort>,
    /// 复位失败的请求，记录变化前不再处理
    abandoned: Option<StatusRecord>,
}

impl ImageWorker {
    pub fn new(
        config: ImageWorkerConfig,
        store: Arc<dyn StatusStorePort>,
        generator: Arc<dyn ImageGenerationPort>,
    ) -> Self {
        Self {
            config,
            store,
            generator,
            abandoned: None,
        }
    }

    /// 读取一次记录，有请求时处理
    pub async fn poll_once(&mut self) -> PollOutcome {
        let record = match self.store.read().await {
            Ok(record) => record,
            Err(StatusStoreError::NotFound) => return PollOutcome::Idle,
            Err(e) => {
                tracing::debug!(error = %e, "Status record unreadable, treating as idle");
                return PollOutcome::Unreadable;
            }
        };

        if !record.is_requested() {
            self.abandoned = None;
            return PollOutcome::Idle;
        }

        if self.abandoned.as_ref() == Some(&record) {
            return PollOutcome::Abandoned { seq: record.seq };
        }
        self.abandoned = None;

        let seq = record.seq;
        let prompt = record.prompt.trim();

        let saved = if prompt.is_empty() {
            tracing::warn!(seq = seq, "Request with empty prompt, clearing");
            false
        } else {
            tracing::info!(prompt = %prompt, seq = seq, "Request received");
            let outcome = self.generator.generate(prompt).await;
            match &outcome.error {
                None => tracing::info!(
                    seq = seq,
                    path = ?outcome.path,
                    "Image request completed"
                ),
                Some(error) => tracing::error!(seq = seq, error = %error, "Image request failed"),
            }
            outcome.saved
        };

        match self.store.clear_if_seq(seq).await {
            Ok(true) => PollOutcome::Processed { seq, saved },
            Ok(false) => {
                tracing::info!(seq = seq, "Newer request arrived during generation, keeping it");
                PollOutcome::Superseded { seq }
            }
            Err(e) => {
                tracing::error!(
                    seq = seq,
                    error = %e,
                    "Failed to reset status record, request dropped"
                );
                self.abandoned = Some(record);
                PollOutcome::ClearFailed { seq }
            }
        }
    }

    /// 启动 Worker，直到进程退出
    pub async fn run(mut self) {
        tracing::info!(
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            "ImageWorker started"
        );

        match self.store.ensure_initialized().await {
            Ok(record) => tracing::debug!(record = %record, "Status record ready"),
            Err(e) => tracing::warn!(error = %e, "Failed to initialize status record"),
        }

        loop {
            match self.poll_once().await {
                // 处理完立即检查是否有后续请求
                PollOutcome::Processed { .. } | PollOutcome::Superseded { .. } => continue,
                PollOutcome::Idle
                | PollOutcome::Unreadable
                | PollOutcome::ClearFailed { .. }
                | PollOutcome::Abandoned { .. } => {
                    tokio::time::sleep(self.config.poll_interval).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ImageOutcome;
    use crate::infrastructure::memory::InMemoryStatusStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 记录调用；可在生成期间写入一个新请求
    #[derive(Default)]
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
        interleave: Option<(Arc<InMemoryStatusStore>, StatusRecord)>,
        fail: bool,
    }

    #[async_trait]
    impl ImageGenerationPort for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> ImageOutcome {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if let Some((store, record)) = &self.interleave {
                store.set_raw(record.to_line());
            }
            if self.fail {
                ImageOutcome::failed("HTTP 500")
            } else {
                ImageOutcome::saved(None)
            }
        }
    }

    fn worker(store: Arc<InMemoryStatusStore>, generator: Arc<RecordingGenerator>) -> ImageWorker {
        ImageWorker::new(ImageWorkerConfig::default(), store, generator)
    }

    #[tokio::test]
    async fn test_idle_poll_has_no_side_effects() {
        let store = Arc::new(InMemoryStatusStore::with_record(&StatusRecord::idle(3)));
        let generator = Arc::new(RecordingGenerator::default());
        let mut worker = worker(store.clone(), generator.clone());

        for _ in 0..3 {
            assert_eq!(worker.poll_once().await, PollOutcome::Idle);
        }

        assert_eq!(store.write_count(), 0);
        assert_eq!(store.read().await.unwrap(), StatusRecord::idle(3));
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_request_processed_then_cleared() {
        let store = Arc::new(InMemoryStatusStore::with_record(&StatusRecord::requested(
            "draw a dog",
            5,
        )));
        let generator = Arc::new(RecordingGenerator::default());
        let mut worker = worker(store.clone(), generator.clone());

        assert_eq!(
            worker.poll_once().await,
            PollOutcome::Processed { seq: 5, saved: true }
        );
        assert_eq!(*generator.prompts.lock().unwrap(), vec!["draw a dog"]);

        let record = store.read().await.unwrap();
        assert_eq!(record.prompt, "");
        assert!(!record.ready);
        assert_eq!(record.seq, 5);

        assert_eq!(worker.poll_once().await, PollOutcome::Idle);
    }

    #[tokio::test]
    async fn test_legacy_request_is_processed() {
        let store = Arc::new(InMemoryStatusStore::with_raw("a red fox,True"));
        let generator = Arc::new(RecordingGenerator::default());
        let mut worker = worker(store.clone(), generator.clone());

        assert_eq!(
            worker.poll_once().await,
            PollOutcome::Processed { seq: 0, saved: true }
        );
        assert_eq!(*generator.prompts.lock().unwrap(), vec!["a red fox"]);
        assert!(!store.read().await.unwrap().ready);
    }

    #[tokio::test]
    async fn test_failed_generation_still_clears() {
        let store = Arc::new(InMemoryStatusStore::with_record(&StatusRecord::requested("x", 1)));
        let generator = Arc::new(RecordingGenerator {
            fail: true,
            ..Default::default()
        });
        let mut worker = worker(store.clone(), generator);

        assert_eq!(
            worker.poll_once().await,
            PollOutcome::Processed { seq: 1, saved: false }
        );
        assert!(!store.read().await.unwrap().ready);
    }

    #[tokio::test]
    async fn test_malformed_record_treated_as_idle() {
        let store = Arc::new(InMemoryStatusStore::with_raw("this is not a record"));
        let generator = Arc::new(RecordingGenerator::default());
        let mut worker = worker(store.clone(), generator.clone());

        assert_eq!(worker.poll_once().await, PollOutcome::Unreadable);
        assert_eq!(store.raw().as_deref(), Some("this is not a record"));
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_record_is_idle() {
        let store = Arc::new(InMemoryStatusStore::new());
        let mut worker = worker(store.clone(), Arc::new(RecordingGenerator::default()));

        assert_eq!(worker.poll_once().await, PollOutcome::Idle);
    }

    #[tokio::test]
    async fn test_newer_request_survives_clear() {
        let store = Arc::new(InMemoryStatusStore::with_record(&StatusRecord::requested(
            "first", 1,
        )));
        let newer = StatusRecord::requested("second", 2);
        let generator = Arc::new(RecordingGenerator {
            interleave: Some((store.clone(), newer.clone())),
            ..Default::default()
        });
        let mut worker = worker(store.clone(), generator.clone());

        assert_eq!(worker.poll_once().await, PollOutcome::Superseded { seq: 1 });
        assert_eq!(store.read().await.unwrap(), newer);
    }

    #[tokio::test]
    async fn test_empty_prompt_request_cleared() {
        let store = Arc::new(InMemoryStatusStore::with_record(&StatusRecord::requested("  ", 4)));
        let generator = Arc::new(RecordingGenerator::default());
        let mut worker = worker(store.clone(), generator.clone());

        assert_eq!(
            worker.poll_once().await,
            PollOutcome::Processed { seq: 4, saved: false }
        );
        assert!(generator.prompts.lock().unwrap().is_empty());
        assert_eq!(store.read().await.unwrap(), StatusRecord::idle(4));
    }

    #[tokio::test]
    async fn test_run_initializes_and_serves_requests() {
        let store = Arc::new(InMemoryStatusStore::new());
        let generator = Arc::new(RecordingGenerator::default());
        let worker = ImageWorker::new(
            ImageWorkerConfig {
                poll_interval: Duration::from_millis(5),
            },
            store.clone(),
            generator.clone(),
        );
        let handle = tokio::spawn(worker.run());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(store.read().await.unwrap(), StatusRecord::idle(0));

        store
            .write(&StatusRecord::requested("mountain lake", 1))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(*generator.prompts.lock().unwrap(), vec!["mountain lake"]);
        assert_eq!(store.read().await.unwrap(), StatusRecord::idle(1));
        handle.abort();
    }

    /// 读取总是返回同一请求、写入总是失败的存储
    struct ReadOnlyStore {
        record: StatusRecord,
    }

    #[async_trait]
    impl StatusStorePort for ReadOnlyStore {
        async fn read(&self) -> Result<StatusRecord, StatusStoreError> {
            Ok(self.record.clone())
        }

        async fn write(&self, _record: &StatusRecord) -> Result<(), StatusStoreError> {
            Err(StatusStoreError::IoError("read-only file system".to_string()))
        }
    }

    #[tokio::test]
    async fn test_clear_failure_drops_request() {
        let store = Arc::new(ReadOnlyStore {
            record: StatusRecord::requested("draw a dog", 1),
        });
        let generator = Arc::new(RecordingGenerator {
            fail: true,
            ..Default::default()
        });
        let mut worker = ImageWorker::new(ImageWorkerConfig::default(), store, generator.clone());

        assert_eq!(worker.poll_once().await, PollOutcome::ClearFailed { seq: 1 });
        assert_eq!(worker.poll_once().await, PollOutcome::Abandoned { seq: 1 });
        assert_eq!(generator.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_new_request_after_clear_failure_is_served() {
        let store = Arc::new(InMemoryStatusStore::with_record(&StatusRecord::requested("first", 1)));
        let generator = Arc::new(RecordingGenerator::default());
        let mut worker = worker(store.clone(), generator.clone());
        worker.abandoned = Some(StatusRecord::requested("first", 1));

        assert_eq!(worker.poll_once().await, PollOutcome::Abandoned { seq: 1 });

        store.set_raw(StatusRecord::requested("second", 2).to_line());
        assert_eq!(
            worker.poll_once().await,
            PollOutcome::Processed { seq: 2, saved: true }
        );
        assert_eq!(*generator.prompts.lock().unwrap(), vec!["second"]);
    }

    #[tokio::test]
    async fn test_run_keeps_polling_interval_when_writes_fail() {
        let store = Arc::new(ReadOnlyStore {
            record: StatusRecord::requested("draw a dog", 1),
        });
        let generator = Arc::new(RecordingGenerator {
            fail: true,
            ..Default::default()
        });
        let worker = ImageWorker::new(
            ImageWorkerConfig {
                poll_interval: Duration::from_millis(20),
            },
            store,
            generator.clone(),
        );
        let handle = tokio::spawn(worker.run());

        tokio::time::sleep(Duration::from_millis(150)).await;
        handle.abort();

        assert_eq!(generator.prompts.lock().unwrap().len(), 1);
    }
}
