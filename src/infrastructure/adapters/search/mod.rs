//! Search Adapter - 网页搜索客户端

mod serper_client;

pub use serper_client::*;
