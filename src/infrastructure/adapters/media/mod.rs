//! Media Adapter - 媒体播放

mod youtube_playback;

pub use youtube_playback::*;
