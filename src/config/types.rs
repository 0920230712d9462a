//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 助手身份
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// 大模型配置
    #[serde(default)]
    pub llm: LlmConfig,

    /// 网页搜索配置
    #[serde(default)]
    pub search: SearchConfig,

    /// 图片生成配置
    #[serde(default)]
    pub image: ImageConfig,

    /// 状态记录（图片请求信箱）配置
    #[serde(default)]
    pub status: StatusConfig,

    /// 对话记录配置
    #[serde(default)]
    pub chat_log: ChatLogConfig,

    /// 语音配置
    #[serde(default)]
    pub voice: VoiceConfig,

    /// 系统自动化配置
    #[serde(default)]
    pub automation: AutomationSettings,

    /// 终端界面配置
    #[serde(default)]
    pub ui: UiConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 助手身份配置
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_assistant_name")]
    pub name: String,
}

fn default_username() -> String {
    "User".to_string()
}

fn default_assistant_name() -> String {
    "Jarvis".to_string()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            name: default_assistant_name(),
        }
    }
}

/// 大模型配置（OpenAI 兼容接口）
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// 请求超时时间（秒）
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_llm_model() -> String {
    "llama3-70b-8192".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.7
}

fn default_llm_timeout() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            api_key: String::new(),
            model: default_llm_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// 网页搜索配置（Serper）
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_url")]
    pub url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_num_results")]
    pub num_results: u32,

    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,
}

fn default_search_url() -> String {
    "https://google.serper.dev/search".to_string()
}

fn default_num_results() -> u32 {
    5
}

fn default_search_timeout() -> u64 {
    20
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: default_search_url(),
            api_key: String::new(),
            num_results: default_num_results(),
            timeout_secs: default_search_timeout(),
        }
    }
}

/// 图片生成方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMode {
    /// 在调度任务内直接请求
    #[default]
    Direct,
    /// 写入状态记录，由 jarvis-image-worker 处理
    Worker,
}

impl ImageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMode::Direct => "direct",
            ImageMode::Worker => "worker",
        }
    }
}

/// 图片生成配置
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_image_base_url")]
    pub base_url: String,

    #[serde(default = "default_image_size")]
    pub width: u32,

    #[serde(default = "default_image_size")]
    pub height: u32,

    /// 图片保存目录
    #[serde(default = "default_data_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub mode: ImageMode,

    /// 保存后是否打开图片
    #[serde(default = "default_true")]
    pub open_after_save: bool,

    #[serde(default = "default_image_timeout")]
    pub timeout_secs: u64,

    /// worker 模式下等待确认的时间（秒），0 表示不等待
    #[serde(default = "default_ack_timeout")]
    pub ack_timeout_secs: u64,
}

fn default_image_base_url() -> String {
    "https://image.pollinations.ai".to_string()
}

fn default_image_size() -> u32 {
    1024
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("Data")
}

fn default_true() -> bool {
    true
}

fn default_image_timeout() -> u64 {
    120
}

fn default_ack_timeout() -> u64 {
    180
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: default_image_base_url(),
            width: default_image_size(),
            height: default_image_size(),
            output_dir: default_data_dir(),
            mode: ImageMode::default(),
            open_after_save: default_true(),
            timeout_secs: default_image_timeout(),
            ack_timeout_secs: default_ack_timeout(),
        }
    }
}

/// 状态记录配置
#[derive(Debug, Clone, Deserialize)]
pub struct StatusConfig {
    /// 记录文件路径
    #[serde(default = "default_status_path")]
    pub path: PathBuf,

    /// 轮询间隔（毫秒）
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

fn default_status_path() -> PathBuf {
    PathBuf::from("Frontend/Files/ImageGeneration.data")
}

fn default_poll_interval() -> u64 {
    1000
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            path: default_status_path(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

/// 对话记录后端
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatLogBackend {
    #[default]
    Json,
    Sqlite,
    Memory,
}

impl ChatLogBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatLogBackend::Json => "json",
            ChatLogBackend::Sqlite => "sqlite",
            ChatLogBackend::Memory => "memory",
        }
    }
}

/// 对话记录配置
#[derive(Debug, Clone, Deserialize)]
pub struct ChatLogConfig {
    #[serde(default)]
    pub backend: ChatLogBackend,

    /// JSON 文件或 SQLite 数据库路径
    #[serde(default = "default_chat_log_path")]
    pub path: PathBuf,
}

fn default_chat_log_path() -> PathBuf {
    PathBuf::from("Data/ChatLog.json")
}

impl Default for ChatLogConfig {
    fn default() -> Self {
        Self {
            backend: ChatLogBackend::default(),
            path: default_chat_log_path(),
        }
    }
}

impl ChatLogConfig {
    /// 获取数据库 URL（sqlite 后端）
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path.display())
    }
}

/// 语音配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoiceConfig {
    /// 是否朗读回答
    #[serde(default)]
    pub tts_enabled: bool,

    /// 语音合成命令，文本作为最后一个参数
    #[serde(default)]
    pub tts_command: Option<String>,

    /// 语音识别命令，stdout 为识别结果
    #[serde(default)]
    pub stt_command: Option<String>,
}

/// 系统自动化配置
#[derive(Debug, Clone, Deserialize)]
pub struct AutomationSettings {
    /// 打开文件 / URL 的命令，未配置时按平台选择
    #[serde(default)]
    pub opener_command: Option<String>,

    /// 关闭程序的命令，未配置时按平台选择
    #[serde(default)]
    pub close_command: Option<String>,

    /// 系统操作（音量等）命令
    #[serde(default)]
    pub system_command: Option<String>,

    /// `content` 命令的保存目录
    #[serde(default = "default_data_dir")]
    pub content_dir: PathBuf,
}

impl Default for AutomationSettings {
    fn default() -> Self {
        Self {
            opener_command: None,
            close_command: None,
            system_command: None,
            content_dir: default_data_dir(),
        }
    }
}

/// 终端界面配置
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// 界面刷新间隔（毫秒）
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_tick_ms() -> u64 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
