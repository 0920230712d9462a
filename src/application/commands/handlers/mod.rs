//! Command Handlers 实现

mod dispatch_engine;

pub use dispatch_engine::*;
