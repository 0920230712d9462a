//! Automation Adapter - 系统自动化命令

mod command;
mod system_automation;

pub use command::AutomationCommand;
pub use system_automation::*;
