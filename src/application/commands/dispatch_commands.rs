//! Dispatch Commands - 一次用户请求的调度结果

use crate::domain::{Intent, IntentKind};

/// 单个意图的执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentOutcome {
    pub intent: Intent,
    /// 失败时为展示给用户的错误信息
    pub result: Result<(), String>,
}

impl IntentOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn kind(&self) -> IntentKind {
        self.intent.kind()
    }
}

/// 调度报告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub query: String,
    /// 分类器是否成功（失败时回退为一个 General 意图）
    pub classified: bool,
    /// 解析出的全部意图（按执行顺序）
    pub intents: Vec<Intent>,
    /// 实际执行过的意图结果
    pub outcomes: Vec<IntentOutcome>,
    /// 是否因 Exit 提前结束
    pub exited: bool,
}

impl DispatchReport {
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_ok()).count()
    }

    /// 未执行的意图数量（Exit 之后的部分）
    pub fn skipped_count(&self) -> usize {
        self.intents.len().saturating_sub(self.outcomes.len())
    }
}
