//! System Adapter - 外部程序调用

mod launcher;

pub use launcher::*;
