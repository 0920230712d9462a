//! UI Port - 界面更新
//!
//! 所有方法都是非阻塞的：实现只负责把界面修改投递给 UI 循环执行

use crate::domain::Speaker;

pub trait UiPort: Send + Sync {
    /// 追加一条对话记录
    fn append_chat(&self, speaker: Speaker, text: String);

    /// 更新状态指示
    fn set_status(&self, text: &str);

    /// 更新日志行
    fn set_log(&self, text: &str);

    /// 显示/隐藏处理中指示
    fn show_progress(&self, busy: bool);

    /// 请求关闭界面
    fn request_shutdown(&self);
}
