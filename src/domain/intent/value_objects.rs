//! Intent Context - Value Objects

use serde::{Deserialize, Serialize};

/// 类型化意图
///
/// 由单个决策字符串解析得到，构造后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Intent {
    /// 普通对话
    General(String),
    /// 实时搜索
    Realtime(String),
    /// 图片生成
    GenerateImage(String),
    /// 媒体播放
    Play(String),
    /// 系统自动化（保留完整的原始命令）
    Automation(String),
    /// 退出
    Exit,
    /// 未识别（按普通对话处理）
    Unclassified(String),
}

/// 意图类别（不带参数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    General,
    Realtime,
    GenerateImage,
    Play,
    Automation,
    Exit,
    Unclassified,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::General => "general",
            IntentKind::Realtime => "realtime",
            IntentKind::GenerateImage => "generate_image",
            IntentKind::Play => "play",
            IntentKind::Automation => "automation",
            IntentKind::Exit => "exit",
            IntentKind::Unclassified => "unclassified",
        }
    }
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::General(_) => IntentKind::General,
            Intent::Realtime(_) => IntentKind::Realtime,
            Intent::GenerateImage(_) => IntentKind::GenerateImage,
            Intent::Play(_) => IntentKind::Play,
            Intent::Automation(_) => IntentKind::Automation,
            Intent::Exit => IntentKind::Exit,
            Intent::Unclassified(_) => IntentKind::Unclassified,
        }
    }

    /// 意图携带的参数文本，`Exit` 没有参数
    pub fn argument(&self) -> Option<&str> {
        match self {
            Intent::General(text)
            | Intent::Realtime(text)
            | Intent::GenerateImage(text)
            | Intent::Play(text)
            | Intent::Automation(text)
            | Intent::Unclassified(text) => Some(text),
            Intent::Exit => None,
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Intent::Exit)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.argument() {
            Some(text) => write!(f, "{}({})", self.kind().as_str(), text),
            None => write!(f, "{}", self.kind().as_str()),
        }
    }
}
