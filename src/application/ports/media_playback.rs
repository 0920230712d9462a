//! Media Playback Port - 媒体播放

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Failed to launch player: {0}")]
    LaunchFailed(String),

    #[error("Nothing to play")]
    EmptyQuery,
}

#[async_trait]
pub trait MediaPlaybackPort: Send + Sync {
    async fn play(&self, query: &str) -> Result<(), PlaybackError>;
}
