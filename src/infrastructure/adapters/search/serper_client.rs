//! Serper Search Client - 调用 google.serper.dev
//!
//! POST {url}
//! Request: {"q": "...", "num": 5}，鉴权头 X-API-KEY
//! Response: {"organic": [{"title", "snippet", "link"}, ...]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{format_search_results, SearchError, SearchHit, SearchPort};

/// 没有自然结果时返回的文本
pub const NO_RESULTS: &str = "No search results found.";

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Option<Vec<SerperOrganic>>,
}

#[derive(Debug, Deserialize)]
struct SerperOrganic {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

impl From<SerperOrganic> for SearchHit {
    fn from(item: SerperOrganic) -> Self {
        Self {
            title: item.title.unwrap_or_else(|| "No Title".to_string()),
            snippet: item.snippet.unwrap_or_else(|| "No Description".to_string()),
            link: item.link.unwrap_or_else(|| "#".to_string()),
        }
    }
}

/// Serper 客户端配置
#[derive(Debug, Clone)]
pub struct SerperClientConfig {
    pub url: String,
    pub api_key: String,
    pub num_results: u32,
    pub timeout_secs: u64,
}

impl Default for SerperClientConfig {
    fn default() -> Self {
        Self {
            url: "https://google.serper.dev/search".to_string(),
            api_key: String::new(),
            num_results: 5,
            timeout_secs: 20,
        }
    }
}

pub struct SerperSearchClient {
    client: Client,
    config: SerperClientConfig,
}

impl SerperSearchClient {
    pub fn new(config: SerperClientConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }
}

/// 把响应体转换为结果块
fn render_response(query: &str, body: SerperResponse) -> String {
    match body.organic {
        Some(items) => {
            let hits: Vec<SearchHit> = items.into_iter().map(SearchHit::from).collect();
            format_search_results(query, &hits)
        }
        None => NO_RESULTS.to_string(),
    }
}

#[async_trait]
impl SearchPort for SerperSearchClient {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        tracing::debug!(query = %query, url = %self.config.url, "Sending search request");

        let response = self
            .client
            .post(&self.config.url)
            .header("X-API-KEY", &self.config.api_key)
            .json(&SerperRequest {
                q: query,
                num: self.config.num_results,
            })
            .send()
            .await
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Search request rejected");
            return Err(SearchError::ServiceError(format!(
                "Serper API request failed with HTTP {}. Check your API key.",
                status
            )));
        }

        let body: SerperResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        Ok(render_response(query, body))
    }
}
