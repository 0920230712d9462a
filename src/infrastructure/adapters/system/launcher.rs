//! Launcher - 通过系统命令打开文件 / URL / 程序
//!
//! 命令行按 shell 规则切分（支持引号，但不经过 shell 执行），目标作为最后一个参数追加

use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Mutex;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Empty command line")]
    EmptyCommand,

    #[error("Invalid command line '{line}': {message}")]
    Parse { line: String, message: String },

    #[error("Failed to spawn {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("{program} exited with {status}: {stderr}")]
    ExitStatus {
        program: String,
        status: String,
        stderr: String,
    },
}

/// 解析后的命令行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn parse(line: &str) -> Result<Self, LaunchError> {
        let mut parts = shell_words::split(line)
            .map_err(|e| LaunchError::Parse {
                line: line.to_string(),
                message: e.to_string(),
            })?
            .into_iter()
            .filter(|part| !part.is_empty());
        let program = parts.next().ok_or(LaunchError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// 追加参数后运行，等待退出并返回 stdout
    pub async fn run<I, S>(&self, extra: I) -> Result<String, LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let output = Command::new(&self.program)
            .args(&self.args)
            .args(extra)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| LaunchError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(LaunchError::ExitStatus {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// 打开文件 / URL / 程序
#[async_trait]
pub trait Launcher: Send + Sync {
    async fn launch(&self, target: &str) -> Result<(), LaunchError>;
}

/// 当前平台默认的打开命令
pub fn default_opener_command() -> &'static str {
    if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// 基于系统打开命令的 Launcher
pub struct SystemOpener {
    command: CommandLine,
}

impl SystemOpener {
    pub fn new(opener_command: &str) -> Result<Self, LaunchError> {
        Ok(Self {
            command: CommandLine::parse(opener_command)?,
        })
    }

    pub fn platform_default() -> Result<Self, LaunchError> {
        Self::new(default_opener_command())
    }
}

#[async_trait]
impl Launcher for SystemOpener {
    async fn launch(&self, target: &str) -> Result<(), LaunchError> {
        tracing::info!(program = %self.command.program(), target = %target, "Launching");
        self.command.run([target]).await.map(|_| ())
    }
}

/// 只记录调用的 Launcher（用于测试）
#[derive(Default)]
pub struct RecordingLauncher {
    launched: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 目标包含给定片段时返回失败
    pub fn failing_on(fragment: impl Into<String>) -> Self {
        Self {
            launched: Mutex::new(Vec::new()),
            fail_on: Some(fragment.into()),
        }
    }

    pub fn launched(&self) -> Vec<String> {
        self.launched.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Launcher for RecordingLauncher {
    async fn launch(&self, target: &str) -> Result<(), LaunchError> {
        if let Ok(mut launched) = self.launched.lock() {
            launched.push(target.to_string());
        }
        match &self.fail_on {
            Some(fragment) if target.contains(fragment.as_str()) => Err(LaunchError::ExitStatus {
                program: "recording".to_string(),
                status: "exit status: 1".to_string(),
                stderr: format!("cannot open {}", target),
            }),
            _ => Ok(()),
        }
    }
}
