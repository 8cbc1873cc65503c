/// YouTube Data API response types for deserialization.
use serde::Deserialize;

/// Response of the videos endpoint with `part=snippet`.
#[derive(Debug, Deserialize)]
pub(super) struct YouTubeVideoList {
    #[serde(default)]
    pub items: Vec<YouTubeVideo>,
}

#[derive(Debug, Deserialize)]
pub(super) struct YouTubeVideo {
    pub snippet: YouTubeSnippet,
}

/// Descriptive fields of a video.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct YouTubeSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_title: String,
}
