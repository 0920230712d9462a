//! Pollinations Image Client
//!
//! GET {base_url}/prompt/{prompt}?width=..&height=..&seed=..&nologo=true
//! 响应体为 JPEG，保存为 {output_dir}/{prompt_with_underscores}.jpg

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{ImageError, ImageGenerationPort, ImageOutcome};
use crate::infrastructure::adapters::system::Launcher;

/// Pollinations 客户端配置
#[derive(Debug, Clone)]
pub struct PollinationsConfig {
    pub base_url: String,
    pub width: u32,
    pub height: u32,
    /// 图片保存目录
    pub output_dir: PathBuf,
    /// 保存后是否用系统程序打开
    pub open_after_save: bool,
    pub timeout_secs: u64,
}

impl Default for PollinationsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://image.pollinations.ai".to_string(),
            width: 1024,
            height: 1024,
            output_dir: PathBuf::from("Data"),
            open_after_save: true,
            timeout_secs: 120,
        }
    }
}

/// 图片文件名：空格替换为下划线，路径分隔符同样替换
pub fn image_file_name(prompt: &str) -> String {
    let stem: String = prompt
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    format!("{}.jpg", stem)
}

pub struct PollinationsImageClient {
    client: Client,
    config: PollinationsConfig,
    launcher: Arc<dyn Launcher>,
}

impl PollinationsImageClient {
    pub fn new(config: PollinationsConfig, launcher: Arc<dyn Launcher>) -> Result<Self, ImageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ImageError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            config,
            launcher,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    fn image_url(&self, prompt: &str, seed: u32) -> Result<Url, ImageError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| ImageError::ServiceError(format!("Invalid image base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| ImageError::ServiceError("Image base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push("prompt")
            .push(prompt);

        url.query_pairs_mut()
            .append_pair("width", &self.config.width.to_string())
            .append_pair("height", &self.config.height.to_string())
            .append_pair("seed", &seed.to_string())
            .append_pair("nologo", "true");

        Ok(url)
    }

    /// 请求图片并保存，返回文件路径
    pub async fn fetch_and_save(&self, prompt: &str) -> Result<PathBuf, ImageError> {
        let seed = random_seed();
        let url = self.image_url(prompt, seed)?;

        tracing::info!(prompt = %prompt, seed = seed, "Requesting image");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ImageError::Timeout("image service".to_string())
                } else {
                    ImageError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::ServiceError(format!(
                "HTTP {} - Failed to generate",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageError::NetworkError(format!("Failed to read image: {}", e)))?;

        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|e| ImageError::StorageError(e.to_string()))?;

        let path = self.config.output_dir.join(image_file_name(prompt));
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| ImageError::StorageError(e.to_string()))?;

        tracing::info!(path = %path.display(), size = bytes.len(), "Image saved");

        if self.config.open_after_save {
            if let Err(e) = self.launcher.launch(&path.to_string_lossy()).await {
                tracing::warn!(path = %path.display(), error = %e, "Unable to open image");
            }
        }

        Ok(path)
    }
}

fn random_seed() -> u32 {
    (uuid::Uuid::new_v4().as_u128() % 10_000) as u32 + 1
}

#[async_trait]
impl ImageGenerationPort for PollinationsImageClient {
    async fn generate(&self, prompt: &str) -> ImageOutcome {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return ImageOutcome::failed("Empty image prompt");
        }

        match self.fetch_and_save(prompt).await {
            Ok(path) => ImageOutcome::saved(Some(path)),
            Err(e) => {
                tracing::error!(prompt = %prompt, error = %e, "Image generation failed");
                e.into()
            }
        }
    }
}
