//! Intent Router - 决策字符串解析
//!
//! 按固定优先级做前缀匹配（区分大小写），第一个命中的规则生效：
//! 1. `general ` → General
//! 2. `realtime ` → Realtime
//! 3. `generate image` → GenerateImage（参数为空时回退到原始用户输入）
//! 4. `play ` → Play
//! 5. `exit`（完全匹配）→ Exit
//! 6. 自动化前缀 → Automation（保留完整决策字符串）
//! 7. 其他 → Unclassified

use super::Intent;

/// 自动化命令前缀
pub const AUTOMATION_PREFIXES: &[&str] = &[
    "open ",
    "close ",
    "content ",
    "google search ",
    "youtube search ",
    "system ",
];

/// 解析单个决策字符串
///
/// `original_query` 仅用于 `generate image` 没有附带描述时的回退
pub fn parse_decision(decision: &str, original_query: &str) -> Intent {
    let decision = decision.trim();

    if let Some(rest) = decision.strip_prefix("general ") {
        return Intent::General(rest.trim().to_string());
    }

    if let Some(rest) = decision.strip_prefix("realtime ") {
        return Intent::Realtime(rest.trim().to_string());
    }

    if let Some(rest) = decision.strip_prefix("generate image") {
        let rest = rest.trim();
        let prompt = if rest.is_empty() {
            original_query.trim()
        } else {
            rest
        };
        return Intent::GenerateImage(prompt.to_string());
    }

    if let Some(rest) = decision.strip_prefix("play ") {
        return Intent::Play(rest.trim().to_string());
    }

    if decision == "exit" {
        return Intent::Exit;
    }

    if AUTOMATION_PREFIXES
        .iter()
        .any(|prefix| decision.starts_with(prefix))
    {
        return Intent::Automation(decision.to_string());
    }

    Intent::Unclassified(decision.to_string())
}

/// 解析整个决策列表
///
/// 空列表视为一个以原始输入为内容的 `Unclassified`
pub fn parse_decisions<S: AsRef<str>>(decisions: &[S], original_query: &str) -> Vec<Intent> {
    if decisions.is_empty() {
        return vec![Intent::Unclassified(original_query.trim().to_string())];
    }

    decisions
        .iter()
        .map(|d| parse_decision(d.as_ref(), original_query))
        .collect()
}
