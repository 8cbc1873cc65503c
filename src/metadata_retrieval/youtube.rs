/// YouTube video metadata client implementation.
use super::youtube_types::YouTubeVideoList;
use super::{MetadataRetrievalError, VideoPlatformApi, VideoSnippet, status_code_message};
use crate::config::Config;

/// Client for the YouTube Data API.
///
/// Only the snippet of a single video is ever requested. When no API key is
/// configured the client answers every lookup with "no such video" without
/// touching the network.
pub struct YouTubeClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
}

impl YouTubeClient {
    /// Creates a new YouTube client from the given configuration.
    pub fn new(config: &Config) -> Result<Self, MetadataRetrievalError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MetadataRetrievalError::RequestError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.youtube_base_url.clone(),
            api_key: config.youtube_api_key.clone(),
        })
    }

    fn convert_list(list: YouTubeVideoList) -> Option<VideoSnippet> {
        list.items.into_iter().next().map(|item| VideoSnippet {
            title: item.snippet.title,
            description: item.snippet.description,
            channel_title: item.snippet.channel_title,
        })
    }
}

impl VideoPlatformApi for YouTubeClient {
    fn fetch_snippet(&self, video_id: &str) -> Result<Option<VideoSnippet>, MetadataRetrievalError> {
        let Some(api_key) = &self.api_key else {
            tracing::debug!(video_id, "no YouTube API key configured, skipping lookup");
            return Ok(None);
        };

        let url = format!("{}/videos", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("id", video_id), ("part", "snippet"), ("key", api_key.as_str())])
            .send()
            .map_err(|e| MetadataRetrievalError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MetadataRetrievalError::InvalidResponse(
                status_code_message(response.status().as_u16()),
            ));
        }

        let list: YouTubeVideoList = response
            .json()
            .map_err(|e| MetadataRetrievalError::DecodingError(e.to_string()))?;

        Ok(Self::convert_list(list))
    }
}
