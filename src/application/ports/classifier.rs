//! Classifier Port - 意图分类器

use async_trait::async_trait;

use crate::application::error::ApplicationError;

/// Classifier Port
///
/// 将用户输入拆分为有序的决策字符串，例如
/// `["general how are you", "open chrome"]`
#[async_trait]
pub trait ClassifierPort: Send + Sync {
    async fn classify(&self, query: &str) -> Result<Vec<String>, ApplicationError>;
}
