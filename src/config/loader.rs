//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `JARVIS_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `JARVIS_LLM__API_KEY=gsk_...`
/// - `JARVIS_SEARCH__API_KEY=...`
/// - `JARVIS_IMAGE__MODE=worker`
/// - `JARVIS_CHAT_LOG__BACKEND=sqlite`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("assistant.username", "User")?
        .set_default("assistant.name", "Jarvis")?
        .set_default("llm.base_url", "https://api.groq.com/openai/v1")?
        .set_default("llm.model", "llama3-70b-8192")?
        .set_default("llm.max_tokens", 1024)?
        .set_default("llm.temperature", 0.7)?
        .set_default("llm.timeout_secs", 60)?
        .set_default("search.url", "https://google.serper.dev/search")?
        .set_default("search.num_results", 5)?
        .set_default("search.timeout_secs", 20)?
        .set_default("image.base_url", "https://image.pollinations.ai")?
        .set_default("image.width", 1024)?
        .set_default("image.height", 1024)?
        .set_default("image.output_dir", "Data")?
        .set_default("image.mode", "direct")?
        .set_default("image.open_after_save", true)?
        .set_default("image.timeout_secs", 120)?
        .set_default("image.ack_timeout_secs", 180)?
        .set_default("status.path", "Frontend/Files/ImageGeneration.data")?
        .set_default("status.poll_interval_ms", 1000)?
        .set_default("chat_log.backend", "json")?
        .set_default("chat_log.path", "Data/ChatLog.json")?
        .set_default("voice.tts_enabled", false)?
        .set_default("automation.content_dir", "Data")?
        .set_default("ui.tick_ms", 100)?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: JARVIS_IMAGE__MODE=worker
    builder = builder.add_source(
        Environment::with_prefix("JARVIS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn require_non_empty(value: &str, what: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "{} cannot be empty",
            what
        )));
    }
    Ok(())
}

/// 验证配置有效性
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    require_non_empty(&config.llm.base_url, "LLM base URL")?;
    require_non_empty(&config.llm.model, "LLM model")?;
    require_non_empty(&config.search.url, "Search URL")?;
    require_non_empty(&config.image.base_url, "Image base URL")?;
    require_non_empty(&config.image.output_dir.to_string_lossy(), "Image output directory")?;
    require_non_empty(&config.status.path.to_string_lossy(), "Status record path")?;
    require_non_empty(&config.chat_log.path.to_string_lossy(), "Chat log path")?;

    if config.llm.max_tokens == 0 {
        return Err(ConfigError::ValidationError(
            "LLM max_tokens cannot be 0".to_string(),
        ));
    }

    if config.image.width == 0 || config.image.height == 0 {
        return Err(ConfigError::ValidationError(
            "Image width and height cannot be 0".to_string(),
        ));
    }

    if config.status.poll_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Status poll interval cannot be 0".to_string(),
        ));
    }

    if config.ui.tick_ms == 0 {
        return Err(ConfigError::ValidationError(
            "UI tick interval cannot be 0".to_string(),
        ));
    }

    if config.voice.tts_enabled && config.voice.tts_command.is_none() {
        tracing::warn!("TTS is enabled but no tts_command is configured, answers will not be spoken");
    }

    Ok(())
}

/// 隐藏密钥，仅保留前 4 个字符
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "(not set)".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{}****", visible)
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Assistant: {} (user: {})", config.assistant.name, config.assistant.username);
    tracing::info!("LLM: {} model={}", config.llm.base_url, config.llm.model);
    tracing::info!("LLM API Key: {}", mask_secret(&config.llm.api_key));
    tracing::info!("Search: {}", config.search.url);
    tracing::info!("Search API Key: {}", mask_secret(&config.search.api_key));
    tracing::info!("Image: {} mode={}", config.image.base_url, config.image.mode.as_str());
    tracing::info!("Image Output: {:?}", config.image.output_dir);
    tracing::info!("Status Record: {:?}", config.status.path);
    tracing::info!(
        "Chat Log: {} at {:?}",
        config.chat_log.backend.as_str(),
        config.chat_log.path
    );
    tracing::info!("TTS Enabled: {}", config.voice.tts_enabled);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
