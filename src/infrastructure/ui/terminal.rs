//! Terminal Renderer - 把 ShellView 的变化输出到终端

use std::io::Write;

use super::shell_view::ShellView;

pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// 输出新的对话条目和状态变化，返回输出的条目数
    pub fn render(&mut self, view: &mut ShellView) -> std::io::Result<usize> {
        let mut written = 0;

        if let Some(status) = view.take_status_change() {
            writeln!(self.out, "  {}", status)?;
        }

        for entry in view.take_unrendered() {
            writeln!(self.out, "{}\n", entry)?;
            written += 1;
        }

        self.out.flush()?;
        Ok(written)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
