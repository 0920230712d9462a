//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod automation;
pub mod image;
pub mod llm;
pub mod media;
pub mod search;
pub mod speech;
pub mod system;

pub use automation::*;
pub use image::*;
pub use llm::*;
pub use media::*;
pub use search::*;
pub use speech::*;
pub use system::*;
