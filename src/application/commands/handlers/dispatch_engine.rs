//! Dispatch Engine - 意图调度
//!
//! 一次用户请求的处理流程：
//! 1. 调用分类器得到决策列表（失败时回退为 `General(query)`）
//! 2. 解析为意图并按顺序逐个执行（同一请求内严格有序）
//! 3. 每个意图的结果通过 UiPort 投递到 UI 循环
//! 4. 遇到 Exit 立即停止，否则最后把状态指示复位为空闲
//!
//! 单个意图失败只影响它自己，后续意图照常执行。
//! 语音播报在独立任务中进行，不影响调度顺序和完成时间。

use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::application::commands::{DispatchReport, IntentOutcome};
use crate::application::ports::{
    ChatCompletionPort, ClassifierPort, ImageGenerationPort, MediaPlaybackPort, OsAutomationPort,
    SpeechInputPort, SpeechOutputPort, UiPort,
};
use crate::domain::{parse_decisions, Intent, Speaker};

/// 调度引擎依赖的全部协作者
#[derive(Clone)]
pub struct AssistantContext {
    pub classifier: Arc<dyn ClassifierPort>,
    /// 普通对话
    pub chatbot: Arc<dyn ChatCompletionPort>,
    /// 搜索增强问答
    pub realtime: Arc<dyn ChatCompletionPort>,
    pub image: Arc<dyn ImageGenerationPort>,
    pub media: Arc<dyn MediaPlaybackPort>,
    pub automation: Arc<dyn OsAutomationPort>,
    pub speech_input: Arc<dyn SpeechInputPort>,
    pub speech_output: Arc<dyn SpeechOutputPort>,
}

/// 调度引擎配置
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// 是否语音播报回答
    pub voice_output: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { voice_output: true }
    }
}

type IntentResult = Result<(), String>;

pub struct DispatchEngine {
    context: AssistantContext,
    ui: Arc<dyn UiPort>,
    voice_output: AtomicBool,
}

impl DispatchEngine {
    pub fn new(context: AssistantContext, ui: Arc<dyn UiPort>, config: DispatchConfig) -> Self {
        Self {
            context,
            ui,
            voice_output: AtomicBool::new(config.voice_output),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 切换语音播报
    pub fn set_voice_output(&self, enabled: bool) {
        self.voice_output.store(enabled, Ordering::Relaxed);
    }

    pub fn voice_output(&self) -> bool {
        self.voice_output.load(Ordering::Relaxed)
    }

    /// 在独立任务中处理一次请求
    pub fn spawn_dispatch(self: &Arc<Self>, query: String) -> JoinHandle<DispatchReport> {
        let engine = self.clone();
        tokio::spawn(async move { engine.dispatch(&query).await })
    }

    /// 在独立任务中进行一次语音输入
    pub fn spawn_listen(self: &Arc<Self>) -> JoinHandle<Option<DispatchReport>> {
        let engine = self.clone();
        tokio::spawn(async move { engine.listen().await })
    }

    /// 分类并执行一次请求，永不返回错误
    pub async fn dispatch(&self, query: &str) -> DispatchReport {
        self.ui.show_progress(true);
        self.ui.set_log("Processing your request...");

        match self.context.classifier.classify(query).await {
            Ok(decisions) => {
                self.ui.set_log(&format!("Model output: {:?}", decisions));
                self.run_intents(parse_decisions(&decisions, query), query, true)
                    .await
            }
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Classification failed, falling back to general chat");
                let intents = vec![Intent::General(query.trim().to_string())];
                self.ui.set_log(&format!("Model output: {:?}", intents));
                self.run_intents(intents, query, false).await
            }
        }
    }

    /// 执行给定的决策列表
    pub async fn dispatch_decisions<S: AsRef<str>>(
        &self,
        decisions: &[S],
        query: &str,
    ) -> DispatchReport {
        self.run_intents(parse_decisions(decisions, query), query, true)
            .await
    }

    /// 语音输入：识别成功后回显并调度
    pub async fn listen(&self) -> Option<DispatchReport> {
        self.ui.set_status("Listening...");
        self.ui.set_log("Listening... Speak now");

        let recognized = self.context.speech_input.recognize().await;
        self.ui.set_status("Ready");

        match recognized {
            Ok(Some(text)) if !text.trim().is_empty() => {
                self.ui.append_chat(Speaker::YouVoice, text.clone());
                Some(self.dispatch(&text).await)
            }
            Ok(_) => {
                tracing::debug!("Nothing recognized");
                self.ui.set_log("Ready");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Speech recognition failed");
                self.ui
                    .append_chat(Speaker::System, format!("Voice recognition error: {}", e));
                self.ui.set_log("Ready");
                None
            }
        }
    }

    async fn run_intents(
        &self,
        intents: Vec<Intent>,
        query: &str,
        classified: bool,
    ) -> DispatchReport {
        let mut outcomes = Vec::with_capacity(intents.len());
        let mut exited = false;

        for intent in &intents {
            let result = match AssertUnwindSafe(self.execute(intent, query))
                .catch_unwind()
                .await
            {
                Ok(result) => result,
                Err(panic) => {
                    let message = format!(
                        "✗ {} handler crashed: {}",
                        intent.kind().as_str(),
                        panic_message(&panic)
                    );
                    tracing::error!(intent = %intent, "Intent handler panicked");
                    self.ui.append_chat(Speaker::System, message.clone());
                    Err(message)
                }
            };

            if let Err(message) = &result {
                tracing::warn!(intent = %intent, error = %message, "Intent failed");
            }

            outcomes.push(IntentOutcome {
                intent: intent.clone(),
                result,
            });

            // Exit 之后的意图不再执行
            if intent.is_exit() {
                exited = true;
                break;
            }
        }

        if !exited {
            self.ui.show_progress(false);
            self.ui.set_status("Ready");
            self.ui.set_log("Ready");
        }

        let report = DispatchReport {
            query: query.to_string(),
            classified,
            intents,
            outcomes,
            exited,
        };

        tracing::info!(
            query = %report.query,
            intents = report.intents.len(),
            failed = report.failed_count(),
            exited = report.exited,
            "Dispatch finished"
        );

        report
    }

    async fn execute(&self, intent: &Intent, query: &str) -> IntentResult {
        match intent {
            Intent::General(prompt) => self.answer(prompt, false).await,
            Intent::Unclassified(text) => {
                let prompt = if text.is_empty() { query } else { text.as_str() };
                self.answer(prompt, false).await
            }
            Intent::Realtime(prompt) => self.answer(prompt, true).await,
            Intent::GenerateImage(prompt) => self.generate_image(prompt).await,
            Intent::Play(param) => self.play(param).await,
            Intent::Automation(raw) => self.automate(raw).await,
            Intent::Exit => {
                self.exit();
                Ok(())
            }
        }
    }

    async fn answer(&self, prompt: &str, realtime: bool) -> IntentResult {
        let (collaborator, status, label) = if realtime {
            (&self.context.realtime, "Searching...", "Search")
        } else {
            (&self.context.chatbot, "Thinking...", "Chat")
        };
        self.ui.set_status(status);

        match collaborator.complete(prompt).await {
            Ok(answer) => {
                self.ui.append_chat(Speaker::Jarvis, answer.clone());
                self.speak_in_background(answer);
                Ok(())
            }
            Err(e) => self.report_failure(format!("✗ {} error: {}", label, e)),
        }
    }

    async fn generate_image(&self, prompt: &str) -> IntentResult {
        self.ui.set_status("Generating...");
        self.ui
            .append_chat(Speaker::System, format!("Generating image: {}", prompt));

        let outcome = self.context.image.generate(prompt).await;
        if outcome.saved {
            let message = match &outcome.path {
                Some(path) => format!("✓ Image saved: {}", path.display()),
                None => "✓ Image generated".to_string(),
            };
            self.ui.append_chat(Speaker::System, message);
            Ok(())
        } else {
            let reason = outcome
                .error
                .unwrap_or_else(|| "image was not saved".to_string());
            self.report_failure(format!("✗ Image generation failed: {}", reason))
        }
    }

    async fn play(&self, param: &str) -> IntentResult {
        self.ui.set_status("Playing...");
        self.ui
            .append_chat(Speaker::System, format!("Playing: {}", param));

        match self.context.media.play(param).await {
            Ok(()) => {
                self.ui
                    .append_chat(Speaker::System, format!("✓ Playback started: {}", param));
                Ok(())
            }
            Err(e) => self.report_failure(format!("✗ Play failed: {}", e)),
        }
    }

    async fn automate(&self, raw: &str) -> IntentResult {
        self.ui.set_status("Executing...");

        match self.context.automation.run(&[raw.to_string()]).await {
            Ok(()) => {
                self.ui
                    .append_chat(Speaker::System, format!("✓ Executed: {}", raw));
                Ok(())
            }
            Err(e) => self.report_failure(format!("✗ Automation error: {}", e)),
        }
    }

    fn exit(&self) {
        self.ui.append_chat(Speaker::System, "Goodbye!".to_string());
        self.ui.set_status("Exiting...");
        self.ui.request_shutdown();
    }

    fn report_failure(&self, message: String) -> IntentResult {
        self.ui.append_chat(Speaker::System, message.clone());
        Err(message)
    }

    /// 语音播报（不等待完成）
    fn speak_in_background(&self, text: String) {
        if !self.voice_output() {
            return;
        }

        let speech = self.context.speech_output.clone();
        let ui = self.ui.clone();
        tokio::spawn(async move {
            if let Err(e) = speech.speak(&text).await {
                tracing::warn!(error = %e, "Speech output failed");
                ui.append_chat(Speaker::System, format!("TTS error: {}", e));
            }
        });
    }
}

fn panic_message(panic: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::application::error::ApplicationError;
    use crate::application::ports::{
        AutomationError, ImageOutcome, PlaybackError, SpeechError,
    };
    use crate::infrastructure::adapters::{NullSpeechInput, NullSpeechOutput};

    /// UI 事件记录
    #[derive(Debug, Clone, PartialEq)]
    enum UiEvent {
        Chat(Speaker, String),
        Status(String),
        Log(String),
        Progress(bool),
        Shutdown,
    }

    #[derive(Default)]
    struct RecordingUi {
        events: Mutex<Vec<UiEvent>>,
    }

    impl RecordingUi {
        fn events(&self) -> Vec<UiEvent> {
            self.events.lock().unwrap().clone()
        }

        fn chats(&self) -> Vec<(Speaker, String)> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    UiEvent::Chat(speaker, text) => Some((speaker, text)),
                    _ => None,
                })
                .collect()
        }
    }

    impl UiPort for RecordingUi {
        fn append_chat(&self, speaker: Speaker, text: String) {
            self.events.lock().unwrap().push(UiEvent::Chat(speaker, text));
        }
        fn set_status(&self, text: &str) {
            self.events.lock().unwrap().push(UiEvent::Status(text.to_string()));
        }
        fn set_log(&self, text: &str) {
            self.events.lock().unwrap().push(UiEvent::Log(text.to_string()));
        }
        fn show_progress(&self, busy: bool) {
            self.events.lock().unwrap().push(UiEvent::Progress(busy));
        }
        fn request_shutdown(&self) {
            self.events.lock().unwrap().push(UiEvent::Shutdown);
        }
    }

    /// 记录调用顺序的协作者集合
    #[derive(Default)]
    struct Calls(Mutex<Vec<String>>);

    impl Calls {
        fn push(&self, call: String) {
            self.0.lock().unwrap().push(call);
        }
        fn list(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct FixedClassifier(Result<Vec<String>, String>);

    #[async_trait]
    impl ClassifierPort for FixedClassifier {
        async fn classify(&self, _query: &str) -> Result<Vec<String>, ApplicationError> {
            self.0.clone().map_err(ApplicationError::classification)
        }
    }

    struct EchoChat {
        name: &'static str,
        calls: Arc<Calls>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl ChatCompletionPort for EchoChat {
        async fn complete(&self, prompt: &str) -> Result<String, ApplicationError> {
            self.calls.push(format!("{}:{}", self.name, prompt));
            if self.fail_on == Some(prompt) {
                return Err(ApplicationError::external("upstream down"));
            }
            Ok(format!("{} answer to {}", self.name, prompt))
        }
    }

    struct FakeImage {
        calls: Arc<Calls>,
        fail: bool,
    }

    #[async_trait]
    impl ImageGenerationPort for FakeImage {
        async fn generate(&self, prompt: &str) -> ImageOutcome {
            self.calls.push(format!("image:{}", prompt));
            if self.fail {
                ImageOutcome::failed("HTTP 500")
            } else {
                ImageOutcome::saved(Some(format!("Data/{}.jpg", prompt.replace(' ', "_")).into()))
            }
        }
    }

    struct FakeMedia {
        calls: Arc<Calls>,
        panic_on: Option<&'static str>,
    }

    #[async_trait]
    impl MediaPlaybackPort for FakeMedia {
        async fn play(&self, query: &str) -> Result<(), PlaybackError> {
            self.calls.push(format!("play:{}", query));
            if self.panic_on == Some(query) {
                panic!("player exploded");
            }
            Ok(())
        }
    }

    struct FakeAutomation {
        calls: Arc<Calls>,
        fail: bool,
    }

    #[async_trait]
    impl OsAutomationPort for FakeAutomation {
        async fn run(&self, commands: &[String]) -> Result<(), AutomationError> {
            // 模拟内部异步执行
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.calls.push(format!("automation:{}", commands.join("|")));
            if self.fail {
                return Err(AutomationError::CommandFailed("no such app".to_string()));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSpeech {
        spoken: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SpeechOutputPort for RecordingSpeech {
        async fn speak(&self, text: &str) -> Result<(), SpeechError> {
            self.spoken.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct ScriptedSpeechInput(Option<String>);

    #[async_trait]
    impl SpeechInputPort for ScriptedSpeechInput {
        async fn recognize(&self) -> Result<Option<String>, SpeechError> {
            Ok(self.0.clone())
        }
    }

    struct Harness {
        calls: Arc<Calls>,
        ui: Arc<RecordingUi>,
        speech: Arc<RecordingSpeech>,
        engine: Arc<DispatchEngine>,
    }

    #[derive(Default)]
    struct HarnessOptions {
        classifier: Option<Result<Vec<String>, String>>,
        chat_fails_on: Option<&'static str>,
        image_fails: bool,
        media_panics_on: Option<&'static str>,
        automation_fails: bool,
        voice_output: bool,
        heard: Option<String>,
    }

    fn harness(options: HarnessOptions) -> Harness {
        let calls = Arc::new(Calls::default());
        let ui = Arc::new(RecordingUi::default());
        let speech = Arc::new(RecordingSpeech::default());

        let speech_input: Arc<dyn SpeechInputPort> = match options.heard {
            Some(text) => Arc::new(ScriptedSpeechInput(Some(text))),
            None => Arc::new(NullSpeechInput),
        };
        let speech_output: Arc<dyn SpeechOutputPort> = if options.voice_output {
            speech.clone()
        } else {
            Arc::new(NullSpeechOutput)
        };

        let context = AssistantContext {
            classifier: Arc::new(FixedClassifier(
                options.classifier.unwrap_or_else(|| Ok(Vec::new())),
            )),
            chatbot: Arc::new(EchoChat {
                name: "chat",
                calls: calls.clone(),
                fail_on: options.chat_fails_on,
            }),
            realtime: Arc::new(EchoChat {
                name: "realtime",
                calls: calls.clone(),
                fail_on: None,
            }),
            image: Arc::new(FakeImage {
                calls: calls.clone(),
                fail: options.image_fails,
            }),
            media: Arc::new(FakeMedia {
                calls: calls.clone(),
                panic_on: options.media_panics_on,
            }),
            automation: Arc::new(FakeAutomation {
                calls: calls.clone(),
                fail: options.automation_fails,
            }),
            speech_input,
            speech_output,
        };

        let engine = DispatchEngine::new(
            context,
            ui.clone(),
            DispatchConfig {
                voice_output: options.voice_output,
            },
        )
        .arc();

        Harness {
            calls,
            ui,
            speech,
            engine,
        }
    }

    #[tokio::test]
    async fn test_exit_stops_remaining_intents() {
        let h = harness(HarnessOptions::default());

        let report = h
            .engine
            .dispatch_decisions(&["general hi", "exit", "play jazz"], "hi")
            .await;

        assert!(report.exited);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(h.calls.list(), vec!["chat:hi"]);

        let events = h.ui.events();
        assert_eq!(
            h.ui.chats(),
            vec![
                (Speaker::Jarvis, "chat answer to hi".to_string()),
                (Speaker::System, "Goodbye!".to_string()),
            ]
        );
        // farewell 在关闭请求之前，且之后不再复位状态
        assert_eq!(events.last(), Some(&UiEvent::Shutdown));
        assert!(!events.contains(&UiEvent::Status("Ready".to_string())));
    }

    #[tokio::test]
    async fn test_failure_is_contained_to_its_intent() {
        let h = harness(HarnessOptions {
            chat_fails_on: Some("second"),
            ..Default::default()
        });

        let report = h
            .engine
            .dispatch_decisions(&["general first", "general second", "general third"], "q")
            .await;

        assert_eq!(report.failed_count(), 1);
        assert!(report.outcomes[0].is_ok());
        assert!(!report.outcomes[1].is_ok());
        assert!(report.outcomes[2].is_ok());
        assert_eq!(
            h.calls.list(),
            vec!["chat:first", "chat:second", "chat:third"]
        );

        let chats = h.ui.chats();
        assert_eq!(chats.len(), 3);
        assert_eq!(chats[0], (Speaker::Jarvis, "chat answer to first".to_string()));
        assert_eq!(chats[1].0, Speaker::System);
        assert!(chats[1].1.starts_with("✗ Chat error"));
        assert_eq!(chats[2], (Speaker::Jarvis, "chat answer to third".to_string()));

        // 有失败时依然复位状态
        let events = h.ui.events();
        assert!(events.ends_with(&[
            UiEvent::Progress(false),
            UiEvent::Status("Ready".to_string()),
            UiEvent::Log("Ready".to_string()),
        ]));
    }

    #[tokio::test]
    async fn test_panicking_handler_does_not_abort_dispatch() {
        let h = harness(HarnessOptions {
            media_panics_on: Some("jazz"),
            ..Default::default()
        });

        let report = h
            .engine
            .dispatch_decisions(&["play jazz", "realtime news"], "q")
            .await;

        assert_eq!(report.outcomes.len(), 2);
        assert!(!report.outcomes[0].is_ok());
        assert!(report.outcomes[1].is_ok());
        assert_eq!(h.calls.list(), vec!["play:jazz", "realtime:news"]);
        assert!(h
            .ui
            .chats()
            .iter()
            .any(|(s, t)| *s == Speaker::System && t.contains("player exploded")));
    }

    #[tokio::test]
    async fn test_classifier_failure_falls_back_to_general() {
        let h = harness(HarnessOptions {
            classifier: Some(Err("model offline".to_string())),
            ..Default::default()
        });

        let report = h.engine.dispatch("what is rust").await;

        assert!(!report.classified);
        assert_eq!(report.intents, vec![Intent::General("what is rust".to_string())]);
        assert_eq!(h.calls.list(), vec!["chat:what is rust"]);
    }

    #[tokio::test]
    async fn test_classifier_failure_with_blank_query_stays_general() {
        let h = harness(HarnessOptions {
            classifier: Some(Err("model offline".to_string())),
            ..Default::default()
        });

        let report = h.engine.dispatch("   ").await;

        assert_eq!(report.intents, vec![Intent::General(String::new())]);
        assert_eq!(report.failed_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_decision_list_is_unclassified_query() {
        let h = harness(HarnessOptions {
            classifier: Some(Ok(Vec::new())),
            ..Default::default()
        });

        let report = h.engine.dispatch("tell me a joke").await;

        assert!(report.classified);
        assert_eq!(
            report.intents,
            vec![Intent::Unclassified("tell me a joke".to_string())]
        );
        assert_eq!(h.calls.list(), vec!["chat:tell me a joke"]);
    }

    #[tokio::test]
    async fn test_intents_run_in_list_order() {
        let h = harness(HarnessOptions {
            classifier: Some(Ok(vec![
                "open chrome".to_string(),
                "generate image".to_string(),
                "realtime weather".to_string(),
                "play lofi".to_string(),
            ])),
            ..Default::default()
        });

        let report = h.engine.dispatch("a red fox").await;

        assert_eq!(report.failed_count(), 0);
        assert_eq!(
            h.calls.list(),
            vec![
                "automation:open chrome",
                "image:a red fox",
                "realtime:weather",
                "play:lofi",
            ]
        );
        let chats = h.ui.chats();
        assert_eq!(chats[0], (Speaker::System, "✓ Executed: open chrome".to_string()));
        assert_eq!(chats[1], (Speaker::System, "Generating image: a red fox".to_string()));
        assert_eq!(chats[2], (Speaker::System, "✓ Image saved: Data/a_red_fox.jpg".to_string()));
    }

    #[tokio::test]
    async fn test_image_and_automation_failures_reported() {
        let h = harness(HarnessOptions {
            image_fails: true,
            automation_fails: true,
            ..Default::default()
        });

        let report = h
            .engine
            .dispatch_decisions(&["generate image a cat", "close notepad"], "q")
            .await;

        assert_eq!(report.failed_count(), 2);
        let chats = h.ui.chats();
        assert_eq!(
            chats[1],
            (Speaker::System, "✗ Image generation failed: HTTP 500".to_string())
        );
        assert!(chats[2].1.starts_with("✗ Automation error"));
    }

    #[tokio::test]
    async fn test_answers_spoken_when_voice_enabled() {
        let h = harness(HarnessOptions {
            voice_output: true,
            ..Default::default()
        });

        h.engine
            .dispatch_decisions(&["general hello", "play jazz"], "q")
            .await;

        // 播报在后台进行，等待其完成
        for _ in 0..50 {
            if !h.speech.spoken.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(
            *h.speech.spoken.lock().unwrap(),
            vec!["chat answer to hello".to_string()]
        );
    }

    #[tokio::test]
    async fn test_voice_output_toggle() {
        let h = harness(HarnessOptions {
            voice_output: true,
            ..Default::default()
        });
        h.engine.set_voice_output(false);

        h.engine.dispatch_decisions(&["general hello"], "q").await;
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(h.speech.spoken.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listen_dispatches_recognized_text() {
        let h = harness(HarnessOptions {
            classifier: Some(Ok(vec!["general good morning".to_string()])),
            heard: Some("good morning".to_string()),
            ..Default::default()
        });

        let report = h.engine.spawn_listen().await.unwrap();

        assert!(report.is_some());
        let chats = h.ui.chats();
        assert_eq!(chats[0], (Speaker::YouVoice, "good morning".to_string()));
        assert_eq!(h.calls.list(), vec!["chat:good morning"]);
    }

    #[tokio::test]
    async fn test_listen_without_speech_does_nothing() {
        let h = harness(HarnessOptions::default());

        let report = h.engine.listen().await;

        assert!(report.is_none());
        assert!(h.ui.chats().is_empty());
        assert!(h.calls.list().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_dispatches_complete_independently() {
        let h = harness(HarnessOptions::default());

        let a = h.engine.spawn_dispatch("first".to_string());
        let b = h.engine.spawn_dispatch("second".to_string());
        let (a, b) = (a.await.unwrap(), b.await.unwrap());

        assert_eq!(a.outcomes.len(), 1);
        assert_eq!(b.outcomes.len(), 1);
        let mut calls = h.calls.list();
        calls.sort();
        assert_eq!(calls, vec!["chat:first", "chat:second"]);
    }
}
