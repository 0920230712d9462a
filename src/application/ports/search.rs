//! Search Port - 网页搜索抽象

use async_trait::async_trait;
use thiserror::Error;

/// 搜索错误
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 单条搜索结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// 把搜索结果格式化为提供给模型的文本块
pub fn format_search_results(query: &str, hits: &[SearchHit]) -> String {
    let mut answer = format!("The search results for '{}' are:\n[start]\n", query);
    for hit in hits {
        answer.push_str(&format!(
            "Title: {}\nDescription: {}\nLink: {}\n\n",
            hit.title, hit.snippet, hit.link
        ));
    }
    answer.push_str("[end]");
    answer
}

/// Search Port
///
/// 返回格式化后的结果块
#[async_trait]
pub trait SearchPort: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, SearchError>;
}
