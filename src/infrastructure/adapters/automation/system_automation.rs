//! System Automation - OsAutomationPort 实现
//!
//! 同一批命令并发执行，全部完成后汇总结果

use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::Url;
use std::path::PathBuf;
use std::sync::Arc;

use super::command::AutomationCommand;
use crate::application::ports::{AutomationError, LlmPort, OsAutomationPort};
use crate::domain::{answer_modifier, ChatMessage};
use crate::infrastructure::adapters::media::youtube_search_url;
use crate::infrastructure::adapters::system::{CommandLine, Launcher};

const CONTENT_WRITER_PROMPT: &str = "You're a Content Writer. You have to write content like letters, codes, applications, essays, notes, songs, poems etc.";

/// 默认的关闭程序命令
pub fn default_close_command() -> &'static str {
    if cfg!(target_os = "windows") {
        "taskkill /F /IM"
    } else {
        "pkill -f"
    }
}

#[derive(Debug, Clone)]
pub struct AutomationConfig {
    /// `content` 命令的保存目录
    pub content_dir: PathBuf,
    /// 关闭程序的命令，程序名作为最后一个参数
    pub close_command: String,
    /// 系统操作命令，操作词作为参数追加；未配置时 `system` 命令不可用
    pub system_command: Option<String>,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("Data"),
            close_command: default_close_command().to_string(),
            system_command: None,
        }
    }
}

pub struct SystemAutomation {
    launcher: Arc<dyn Launcher>,
    llm: Arc<dyn LlmPort>,
    close_command: CommandLine,
    system_command: Option<CommandLine>,
    content_dir: PathBuf,
}

impl SystemAutomation {
    pub fn new(
        config: AutomationConfig,
        launcher: Arc<dyn Launcher>,
        llm: Arc<dyn LlmPort>,
    ) -> Result<Self, AutomationError> {
        let close_command = CommandLine::parse(&config.close_command)
            .map_err(|e| AutomationError::CommandFailed(e.to_string()))?;
        let system_command = config
            .system_command
            .as_deref()
            .filter(|line| !line.trim().is_empty())
            .map(CommandLine::parse)
            .transpose()
            .map_err(|e| AutomationError::CommandFailed(e.to_string()))?;

        Ok(Self {
            launcher,
            llm,
            close_command,
            system_command,
            content_dir: config.content_dir,
        })
    }

    async fn launch(&self, target: &str) -> Result<(), AutomationError> {
        self.launcher
            .launch(target)
            .await
            .map_err(|e| AutomationError::CommandFailed(e.to_string()))
    }

    async fn google_search(&self, query: &str) -> Result<(), AutomationError> {
        let url = Url::parse_with_params("https://www.google.com/search", &[("q", query)])
            .map_err(|e| AutomationError::CommandFailed(e.to_string()))?;
        self.launch(url.as_str()).await
    }

    async fn open(&self, app: &str) -> Result<(), AutomationError> {
        match self.launch(app).await {
            Ok(()) => Ok(()),
            Err(e) => {
                // 打不开时改为网页搜索
                tracing::info!(app = %app, error = %e, "Open failed, searching the web instead");
                self.google_search(app).await
            }
        }
    }

    async fn close(&self, app: &str) -> Result<(), AutomationError> {
        self.close_command
            .run([app])
            .await
            .map(|_| ())
            .map_err(|e| AutomationError::CommandFailed(e.to_string()))
    }

    async fn content(&self, topic: &str) -> Result<(), AutomationError> {
        let messages = [
            ChatMessage::system(CONTENT_WRITER_PROMPT),
            ChatMessage::user(format!("Write a {}", topic)),
        ];
        let text = self
            .llm
            .chat(&messages)
            .await
            .map_err(|e| AutomationError::ContentFailed(e.to_string()))?;
        let text = answer_modifier(&text);

        tokio::fs::create_dir_all(&self.content_dir)
            .await
            .map_err(|e| AutomationError::ContentFailed(e.to_string()))?;

        let file_name = format!("{}.txt", topic.to_lowercase().replace([' ', '/', '\\'], "_"));
        let path = self.content_dir.join(file_name);
        tokio::fs::write(&path, text)
            .await
            .map_err(|e| AutomationError::ContentFailed(e.to_string()))?;

        tracing::info!(topic = %topic, path = %path.display(), "Content written");
        self.launch(&path.to_string_lossy()).await
    }

    async fn system(&self, action: &str) -> Result<(), AutomationError> {
        let command = self
            .system_command
            .as_ref()
            .ok_or_else(|| AutomationError::Unsupported(format!("system {}", action)))?;

        command
            .run(action.split_whitespace())
            .await
            .map(|_| ())
            .map_err(|e| AutomationError::CommandFailed(e.to_string()))
    }

    async fn execute(&self, raw: &str) -> Result<(), AutomationError> {
        let command = AutomationCommand::parse(raw)?;
        tracing::debug!(command = command.name(), raw = %raw, "Running automation command");

        match &command {
            AutomationCommand::Open(app) => self.open(app).await,
            AutomationCommand::Close(app) => self.close(app).await,
            AutomationCommand::GoogleSearch(query) => self.google_search(query).await,
            AutomationCommand::YoutubeSearch(query) => {
                let url = youtube_search_url(query)
                    .map_err(|e| AutomationError::CommandFailed(e.to_string()))?;
                self.launch(url.as_str()).await
            }
            AutomationCommand::Content(topic) => self.content(topic).await,
            AutomationCommand::System(action) => self.system(action).await,
        }
    }
}

#[async_trait]
impl OsAutomationPort for SystemAutomation {
    async fn run(&self, commands: &[String]) -> Result<(), AutomationError> {
        let results = join_all(commands.iter().map(|raw| self.execute(raw))).await;

        let total = results.len();
        let mut errors: Vec<AutomationError> = results.into_iter().filter_map(Result::err).collect();

        match errors.len() {
            0 => Ok(()),
            1 if total == 1 => Err(errors.remove(0)),
            failed => {
                let details = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                tracing::warn!(failed = failed, total = total, "Automation batch partially failed");
                Err(AutomationError::Partial {
                    failed,
                    total,
                    details,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::llm::FakeLlmClient;
    use crate::infrastructure::adapters::system::RecordingLauncher;
    use tempfile::TempDir;

    fn automation(
        dir: &TempDir,
        launcher: Arc<RecordingLauncher>,
        llm: Arc<FakeLlmClient>,
        system_command: Option<&str>,
    ) -> SystemAutomation {
        let config = AutomationConfig {
            content_dir: dir.path().to_path_buf(),
            close_command: "true".to_string(),
            system_command: system_command.map(str::to_string),
        };
        SystemAutomation::new(config, launcher, llm).unwrap()
    }

    #[tokio::test]
    async fn test_searches_open_urls() {
        let dir = TempDir::new().unwrap();
        let launcher = Arc::new(RecordingLauncher::new());
        let auto = automation(&dir, launcher.clone(), Arc::new(FakeLlmClient::with_replies(["x"])), None);

        auto.run(&[
            "google search rust lang".to_string(),
            "youtube search lofi".to_string(),
        ])
        .await
        .unwrap();

        let mut launched = launcher.launched();
        launched.sort();
        assert_eq!(
            launched,
            vec![
                "https://www.google.com/search?q=rust+lang",
                "https://www.youtube.com/results?search_query=lofi",
            ]
        );
    }

    #[tokio::test]
    async fn test_open_falls_back_to_web_search() {
        let dir = TempDir::new().unwrap();
        let launcher = Arc::new(RecordingLauncher::failing_on("notepad"));
        let auto = automation(&dir, launcher.clone(), Arc::new(FakeLlmClient::with_replies(["x"])), None);

        // 回退的搜索 URL 同样包含 notepad，因此整体失败
        assert!(auto.run(&["open notepad".to_string()]).await.is_err());
        assert_eq!(launcher.launched().len(), 2);

        let launcher = Arc::new(RecordingLauncher::failing_on("/usr/bin"));
        let auto = automation(&dir, launcher.clone(), Arc::new(FakeLlmClient::with_replies(["x"])), None);
        auto.run(&["open /usr/bin/thing".to_string()]).await.unwrap();
        assert_eq!(launcher.launched()[1], "https://www.google.com/search?q=%2Fusr%2Fbin%2Fthing");
    }

    #[tokio::test]
    async fn test_content_written_and_opened() {
        let dir = TempDir::new().unwrap();
        let launcher = Arc::new(RecordingLauncher::new());
        let llm = Arc::new(FakeLlmClient::with_replies(["Dear Sir,\n\nI request leave.</s>"]));
        let auto = automation(&dir, launcher.clone(), llm.clone(), None);

        auto.run(&["content Leave Application".to_string()]).await.unwrap();

        let path = dir.path().join("leave_application.txt");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Dear Sir,\nI request leave.");
        assert_eq!(launcher.launched(), vec![path.to_string_lossy().to_string()]);
        assert_eq!(llm.requests()[0][1], ChatMessage::user("Write a Leave Application"));
    }

    #[tokio::test]
    async fn test_system_requires_configured_command() {
        let dir = TempDir::new().unwrap();
        let auto = automation(
            &dir,
            Arc::new(RecordingLauncher::new()),
            Arc::new(FakeLlmClient::with_replies(["x"])),
            None,
        );

        assert!(matches!(
            auto.run(&["system mute".to_string()]).await,
            Err(AutomationError::Unsupported(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_and_close_run_commands() {
        let dir = TempDir::new().unwrap();
        let auto = automation(
            &dir,
            Arc::new(RecordingLauncher::new()),
            Arc::new(FakeLlmClient::with_replies(["x"])),
            Some("echo"),
        );

        auto.run(&["system volume up".to_string(), "close chrome".to_string()])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_partial_failure_reports_counts() {
        let dir = TempDir::new().unwrap();
        let launcher = Arc::new(RecordingLauncher::new());
        let auto = automation(&dir, launcher.clone(), Arc::new(FakeLlmClient::failing("offline")), None);

        let result = auto
            .run(&[
                "google search weather".to_string(),
                "content poem".to_string(),
                "dance".to_string(),
            ])
            .await;

        match result {
            Err(AutomationError::Partial { failed, total, details }) => {
                assert_eq!((failed, total), (2, 3));
                assert!(details.contains("offline"));
                assert!(details.contains("dance"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        // 成功的命令不受影响
        assert_eq!(launcher.launched(), vec!["https://www.google.com/search?q=weather"]);
    }
}
