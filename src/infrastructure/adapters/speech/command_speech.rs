//! Command Speech - 调用外部程序进行语音合成 / 识别
//!
//! - 输出：`<tts_command> <text>`
//! - 输入：运行 `<stt_command>`，stdout 即识别结果

use async_trait::async_trait;

use crate::application::ports::{SpeechError, SpeechInputPort, SpeechOutputPort};
use crate::infrastructure::adapters::system::{CommandLine, LaunchError};

fn map_launch_error(err: LaunchError) -> SpeechError {
    match err {
        LaunchError::Spawn { .. } | LaunchError::EmptyCommand | LaunchError::Parse { .. } => {
            SpeechError::Unavailable(err.to_string())
        }
        LaunchError::ExitStatus { .. } => SpeechError::CommandFailed(err.to_string()),
    }
}

pub struct CommandSpeechOutput {
    command: CommandLine,
}

impl CommandSpeechOutput {
    pub fn new(command_line: &str) -> Result<Self, SpeechError> {
        Ok(Self {
            command: CommandLine::parse(command_line).map_err(map_launch_error)?,
        })
    }
}

#[async_trait]
impl SpeechOutputPort for CommandSpeechOutput {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        tracing::debug!(program = %self.command.program(), text_len = text.len(), "Speaking");
        self.command.run([text]).await.map(|_| ()).map_err(map_launch_error)
    }
}

pub struct CommandSpeechInput {
    command: CommandLine,
}

impl CommandSpeechInput {
    pub fn new(command_line: &str) -> Result<Self, SpeechError> {
        Ok(Self {
            command: CommandLine::parse(command_line).map_err(map_launch_error)?,
        })
    }
}

#[async_trait]
impl SpeechInputPort for CommandSpeechInput {
    async fn recognize(&self) -> Result<Option<String>, SpeechError> {
        let output = self
            .command
            .run(Vec::<String>::new())
            .await
            .map_err(map_launch_error)?;

        let text = output.trim();
        tracing::debug!(recognized_len = text.len(), "Speech recognition finished");
        Ok((!text.is_empty()).then(|| text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_rejected() {
        assert!(matches!(
            CommandSpeechOutput::new(" "),
            Err(SpeechError::Unavailable(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_recognize_reads_stdout() {
        let input = CommandSpeechInput::new("echo what time is it").unwrap();
        assert_eq!(
            input.recognize().await.unwrap(),
            Some("what time is it".to_string())
        );

        let silent = CommandSpeechInput::new("true").unwrap();
        assert_eq!(silent.recognize().await.unwrap(), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_speak_reports_failures() {
        let output = CommandSpeechOutput::new("true").unwrap();
        output.speak("hello").await.unwrap();

        let failing = CommandSpeechOutput::new("false").unwrap();
        assert!(matches!(
            failing.speak("hello").await,
            Err(SpeechError::CommandFailed(_))
        ));

        let missing = CommandSpeechOutput::new("no-such-tts-binary-xyz").unwrap();
        assert!(matches!(
            missing.speak("hello").await,
            Err(SpeechError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_null_speech() {
        use crate::infrastructure::adapters::{NullSpeechInput, NullSpeechOutput};

        assert_eq!(NullSpeechInput.recognize().await.unwrap(), None);
        NullSpeechOutput.speak("ignored").await.unwrap();
    }
}
