//! OS Automation Port - 系统自动化
//!
//! 协作者内部是异步的，调度引擎会等待其完成后再回报结果

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("Unsupported command: {0}")]
    Unsupported(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Content generation failed: {0}")]
    ContentFailed(String),

    #[error("{failed} of {total} commands failed: {details}")]
    Partial {
        failed: usize,
        total: usize,
        details: String,
    },
}

#[async_trait]
pub trait OsAutomationPort: Send + Sync {
    async fn run(&self, commands: &[String]) -> Result<(), AutomationError>;
}
