//! Intent Context - 意图识别上下文
//!
//! 将分类器输出的决策字符串解析为类型化的意图

mod router;
mod value_objects;

pub use router::{parse_decision, parse_decisions, AUTOMATION_PREFIXES};
pub use value_objects::{Intent, IntentKind};
