//! Jarvis - 终端语音助手
//!
//! main 任务即 UI 循环：独占 ShellView，按固定 tick 执行排队的界面修改并渲染；
//! 每个请求在独立任务中调度

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::AbortHandle;

use jarvis::application::ports::{
    ChatHistoryPort, ImageGenerationPort, SpeechInputPort, SpeechOutputPort, UiPort,
};
use jarvis::application::{
    AssistantContext, AssistantProfile, ChatbotService, DispatchConfig, DispatchEngine,
    LlmClassifier, RealtimeSearchEngine,
};
use jarvis::config::{load_config, print_config, AppConfig, ChatLogBackend, ImageMode};
use jarvis::domain::Speaker;
use jarvis::infrastructure::adapters::{
    default_close_command, default_opener_command, AutomationConfig, CommandSpeechInput,
    CommandSpeechOutput, MailboxConfig, MailboxImageGenerator, NullSpeechInput, NullSpeechOutput,
    OpenAiClient, OpenAiClientConfig, PollinationsConfig, PollinationsImageClient,
    SerperClientConfig, SerperSearchClient, SystemAutomation, SystemOpener, YoutubePlayback,
};
use jarvis::infrastructure::memory::InMemoryChatHistory;
use jarvis::infrastructure::persistence::{
    create_pool, run_migrations, DatabaseConfig, FileStatusStore, JsonFileChatHistory,
    SqliteChatHistory,
};
use jarvis::infrastructure::ui::{QueueingUi, ShellView, TerminalRenderer, WorkQueue};

const WELCOME: &str = "Hello! I'm J.A.R.V.I.S., your AI assistant. How can I help you today?";

const HELP: &str = "Commands:\n  /voice     speak a request\n  /tts on|off  toggle spoken answers\n  /new       start a new chat\n  /help      show this help\nSay \"exit\" or \"bye\" to quit.";

async fn build_history(config: &AppConfig) -> anyhow::Result<Arc<dyn ChatHistoryPort>> {
    let path = &config.chat_log.path;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let history: Arc<dyn ChatHistoryPort> = match config.chat_log.backend {
        ChatLogBackend::Json => {
            let history = JsonFileChatHistory::new(path);
            history.ensure_exists().await?;
            Arc::new(history)
        }
        ChatLogBackend::Sqlite => {
            let db_config = DatabaseConfig {
                database_url: config.chat_log.database_url(),
                max_connections: 5,
            };
            let pool = create_pool(&db_config).await?;
            run_migrations(&pool).await?;
            Arc::new(SqliteChatHistory::new(pool))
        }
        ChatLogBackend::Memory => Arc::new(InMemoryChatHistory::new()),
    };

    Ok(history)
}

fn build_speech(config: &AppConfig) -> anyhow::Result<(Arc<dyn SpeechInputPort>, Arc<dyn SpeechOutputPort>)> {
    let input: Arc<dyn SpeechInputPort> = match config.voice.stt_command.as_deref() {
        Some(command) if !command.trim().is_empty() => Arc::new(CommandSpeechInput::new(command)?),
        _ => {
            tracing::info!("No speech input command configured, /voice is disabled");
            Arc::new(NullSpeechInput)
        }
    };

    let output: Arc<dyn SpeechOutputPort> = match config.voice.tts_command.as_deref() {
        Some(command) if !command.trim().is_empty() => Arc::new(CommandSpeechOutput::new(command)?),
        _ => Arc::new(NullSpeechOutput),
    };

    Ok((input, output))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 日志输出到 stderr，stdout 留给对话
    let log_filter = format!("{},jarvis={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Jarvis - terminal assistant");
    print_config(&config);

    // 模型与搜索客户端
    let llm = Arc::new(OpenAiClient::new(OpenAiClientConfig {
        base_url: config.llm.base_url.clone(),
        api_key: config.llm.api_key.clone(),
        model: config.llm.model.clone(),
        max_tokens: config.llm.max_tokens,
        temperature: config.llm.temperature,
        timeout_secs: config.llm.timeout_secs,
    })?);
    let search = Arc::new(SerperSearchClient::new(SerperClientConfig {
        url: config.search.url.clone(),
        api_key: config.search.api_key.clone(),
        num_results: config.search.num_results,
        timeout_secs: config.search.timeout_secs,
    })?);

    let history = build_history(&config).await?;
    let profile = AssistantProfile::new(&config.assistant.username, &config.assistant.name);

    let launcher = Arc::new(SystemOpener::new(
        config
            .automation
            .opener_command
            .as_deref()
            .unwrap_or_else(|| default_opener_command()),
    )?);

    let image: Arc<dyn ImageGenerationPort> = match config.image.mode {
        ImageMode::Direct => Arc::new(PollinationsImageClient::new(
            PollinationsConfig {
                base_url: config.image.base_url.clone(),
                width: config.image.width,
                height: config.image.height,
                output_dir: config.image.output_dir.clone(),
                open_after_save: config.image.open_after_save,
                timeout_secs: config.image.timeout_secs,
            },
            launcher.clone(),
        )?),
        ImageMode::Worker => {
            let store = Arc::new(FileStatusStore::new(&config.status.path));
            let poll_interval = Duration::from_millis(config.status.poll_interval_ms);
            Arc::new(MailboxImageGenerator::new(
                store,
                MailboxConfig {
                    poll_interval,
                    ack_timeout: Duration::from_secs(config.image.ack_timeout_secs),
                    ..Default::default()
                },
            ))
        }
    };

    let automation = Arc::new(SystemAutomation::new(
        AutomationConfig {
            content_dir: config.automation.content_dir.clone(),
            close_command: config
                .automation
                .close_command
                .clone()
                .unwrap_or_else(|| default_close_command().to_string()),
            system_command: config.automation.system_command.clone(),
        },
        launcher.clone(),
        llm.clone(),
    )?);

    let (speech_input, speech_output) = build_speech(&config)?;

    let context = AssistantContext {
        classifier: Arc::new(LlmClassifier::new(llm.clone())),
        chatbot: Arc::new(ChatbotService::new(llm.clone(), history.clone(), profile.clone())),
        realtime: Arc::new(RealtimeSearchEngine::new(
            llm.clone(),
            search,
            history.clone(),
            profile,
        )),
        image,
        media: Arc::new(YoutubePlayback::new(launcher)),
        automation,
        speech_input,
        speech_output,
    };

    // UI 循环独占 view 与 drainer
    let (queue, mut drainer) = WorkQueue::new();
    let ui = Arc::new(QueueingUi::new(queue));
    let mut view = ShellView::new();
    let mut renderer = TerminalRenderer::new(std::io::stdout());

    let engine = DispatchEngine::new(
        context,
        ui.clone(),
        DispatchConfig {
            voice_output: config.voice.tts_enabled,
        },
    )
    .arc();

    ui.append_chat(Speaker::Jarvis, WELCOME.to_string());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut in_flight: Vec<AbortHandle> = Vec::new();
    let mut tick = tokio::time::interval(Duration::from_millis(config.ui.tick_ms));

    loop {
        tokio::select! {
            _ = tick.tick() => {
                drainer.drain_and_run(&mut view);
                if let Err(e) = renderer.render(&mut view) {
                    tracing::error!(error = %e, "Failed to render transcript");
                }
                if view.should_quit() {
                    break;
                }
                in_flight.retain(|handle| !handle.is_finished());
                if !stdin_open && in_flight.is_empty() {
                    tracing::info!("Input closed and no requests pending");
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => {
                        let line = line.trim().to_string();
                        if line.is_empty() {
                            continue;
                        }
                        match line.as_str() {
                            "/help" => ui.append_chat(Speaker::System, HELP.to_string()),
                            "/voice" => in_flight.push(engine.spawn_listen().abort_handle()),
                            "/tts on" | "/tts off" => {
                                let enabled = line.ends_with("on");
                                engine.set_voice_output(enabled);
                                ui.append_chat(
                                    Speaker::System,
                                    format!("Text-to-speech {}", if enabled { "enabled" } else { "disabled" }),
                                );
                            }
                            "/new" => {
                                let history = history.clone();
                                let ui = ui.clone();
                                tokio::spawn(async move {
                                    if let Err(e) = history.clear().await {
                                        tracing::error!(error = %e, "Failed to clear chat log");
                                        ui.append_chat(Speaker::System, format!("✗ Could not clear chat log: {}", e));
                                    }
                                    ui.clear_chat();
                                });
                            }
                            _ => {
                                ui.append_chat(Speaker::You, line.clone());
                                in_flight.push(engine.spawn_dispatch(line).abort_handle());
                            }
                        }
                    }
                    Ok(None) => {
                        tracing::debug!("Standard input closed");
                        stdin_open = false;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read input");
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received shutdown signal");
                break;
            }
        }
    }

    // 输出最后的告别等消息
    drainer.drain_and_run(&mut view);
    renderer.render(&mut view)?;

    tracing::info!("Jarvis shutdown complete");
    Ok(())
}
