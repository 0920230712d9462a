//! 纯文本文件持久化

mod atomic;
mod status_file;

pub use atomic::write_atomic;
pub use status_file::FileStatusStore;
