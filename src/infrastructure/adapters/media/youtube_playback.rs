//! YouTube Playback - 在浏览器中打开 YouTube 搜索结果

use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;

use crate::application::ports::{MediaPlaybackPort, PlaybackError};
use crate::infrastructure::adapters::system::Launcher;

const YOUTUBE_RESULTS: &str = "https://www.youtube.com/results";

/// YouTube 搜索结果页 URL
pub fn youtube_search_url(query: &str) -> Result<Url, PlaybackError> {
    Url::parse_with_params(YOUTUBE_RESULTS, &[("search_query", query)])
        .map_err(|e| PlaybackError::LaunchFailed(e.to_string()))
}

pub struct YoutubePlayback {
    launcher: Arc<dyn Launcher>,
}

impl YoutubePlayback {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl MediaPlaybackPort for YoutubePlayback {
    async fn play(&self, query: &str) -> Result<(), PlaybackError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(PlaybackError::EmptyQuery);
        }

        let url = youtube_search_url(query)?;
        tracing::info!(query = %query, url = %url, "Opening YouTube");

        self.launcher
            .launch(url.as_str())
            .await
            .map_err(|e| PlaybackError::LaunchFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::system::RecordingLauncher;

    #[test]
    fn test_search_url_is_escaped() {
        let url = youtube_search_url("lofi hip hop & chill").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.youtube.com/results?search_query=lofi+hip+hop+%26+chill"
        );
    }

    #[tokio::test]
    async fn test_play_opens_search_page() {
        let launcher = Arc::new(RecordingLauncher::new());
        let playback = YoutubePlayback::new(launcher.clone());

        playback.play(" despacito ").await.unwrap();

        assert_eq!(
            launcher.launched(),
            vec!["https://www.youtube.com/results?search_query=despacito"]
        );
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let launcher = Arc::new(RecordingLauncher::new());
        let playback = YoutubePlayback::new(launcher.clone());

        assert!(matches!(playback.play("  ").await, Err(PlaybackError::EmptyQuery)));
        assert!(launcher.launched().is_empty());
    }

    #[tokio::test]
    async fn test_launch_failure_reported() {
        let playback = YoutubePlayback::new(Arc::new(RecordingLauncher::failing_on("youtube")));
        assert!(matches!(
            playback.play("jazz").await,
            Err(PlaybackError::LaunchFailed(_))
        ));
    }
}
