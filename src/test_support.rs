//! In-memory catalog and video platform used by the unit tests
//!
//! Every call is recorded so tests can assert which data sources were queried.
//! Lookups for ids the fake knows nothing about fail with a 404 style error.

use crate::metadata_retrieval::{
    CatalogApi, CatalogQuery, MetadataRetrievalError, Network, Provider, RegionProviders, Show,
    ShowDetails, Video, VideoPlatformApi, VideoSnippet, WatchProviderListing,
};
use std::collections::HashMap;
use std::sync::Mutex;

fn not_found() -> MetadataRetrievalError {
    MetadataRetrievalError::InvalidResponse("Status code: 404".to_string())
}

pub(crate) fn show(id: u64, name: &str) -> Show {
    Show {
        id,
        name: name.to_string(),
        original_name: None,
        overview: String::new(),
        poster_path: None,
        backdrop_path: None,
        first_air_date: None,
        vote_average: None,
        trailer_key: None,
        watch_providers: None,
    }
}

pub(crate) fn video(key: &str, kind: &str, name: &str) -> Video {
    Video {
        key: key.to_string(),
        site: "YouTube".to_string(),
        kind: kind.to_string(),
        name: name.to_string(),
    }
}

pub(crate) fn details(overview: &str, networks: &[&str]) -> ShowDetails {
    ShowDetails {
        overview: overview.to_string(),
        networks: networks
            .iter()
            .map(|name| Network {
                name: name.to_string(),
            })
            .collect(),
    }
}

#[derive(Default)]
pub(crate) struct FakeCatalog {
    shows: Vec<Show>,
    shows_error: Option<String>,
    videos: HashMap<(u64, String), Vec<Video>>,
    providers: HashMap<u64, WatchProviderListing>,
    details: HashMap<u64, ShowDetails>,
    calls: Mutex<Vec<String>>,
    queries: Mutex<Vec<CatalogQuery>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shows(mut self, shows: Vec<Show>) -> Self {
        self.shows = shows;
        self
    }

    /// Makes the listing request fail with the given status message
    pub fn with_listing_error(mut self, message: &str) -> Self {
        self.shows_error = Some(message.to_string());
        self
    }

    pub fn with_videos(mut self, show_id: u64, language: &str, videos: Vec<Video>) -> Self {
        self.videos.insert((show_id, language.to_string()), videos);
        self
    }

    pub fn with_flatrate(mut self, show_id: u64, region: &str, providers: Vec<Provider>) -> Self {
        let mut listing = WatchProviderListing::default();
        listing.results.insert(
            region.to_string(),
            RegionProviders {
                flatrate: Some(providers),
            },
        );
        self.providers.insert(show_id, listing);
        self
    }

    pub fn with_details(mut self, show_id: u64, details: ShowDetails) -> Self {
        self.details.insert(show_id, details);
        self
    }

    /// All recorded calls, e.g. `videos:1:pt-BR`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<CatalogQuery> {
        self.queries.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl CatalogApi for FakeCatalog {
    fn fetch_shows(&self, query: &CatalogQuery) -> Result<Vec<Show>, MetadataRetrievalError> {
        self.record("shows".to_string());
        self.queries.lock().unwrap().push(*query);
        match &self.shows_error {
            Some(message) => Err(MetadataRetrievalError::InvalidResponse(message.clone())),
            None => Ok(self.shows.clone()),
        }
    }

    fn fetch_videos(
        &self,
        show_id: u64,
        language: &str,
    ) -> Result<Vec<Video>, MetadataRetrievalError> {
        self.record(format!("videos:{}:{}", show_id, language));
        self.videos
            .get(&(show_id, language.to_string()))
            .cloned()
            .ok_or_else(not_found)
    }

    fn fetch_watch_providers(
        &self,
        show_id: u64,
    ) -> Result<WatchProviderListing, MetadataRetrievalError> {
        self.record(format!("providers:{}", show_id));
        self.providers.get(&show_id).cloned().ok_or_else(not_found)
    }

    fn fetch_show_details(
        &self,
        show_id: u64,
        language: &str,
    ) -> Result<ShowDetails, MetadataRetrievalError> {
        self.record(format!("details:{}:{}", show_id, language));
        self.details.get(&show_id).cloned().ok_or_else(not_found)
    }
}

#[derive(Default)]
pub(crate) struct FakeVideoPlatform {
    snippets: HashMap<String, VideoSnippet>,
    failures: HashMap<String, MetadataRetrievalError>,
    calls: Mutex<Vec<String>>,
}

impl FakeVideoPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snippet(mut self, video_id: &str, title: &str, description: &str, channel: &str) -> Self {
        self.snippets.insert(
            video_id.to_string(),
            VideoSnippet {
                title: title.to_string(),
                description: description.to_string(),
                channel_title: channel.to_string(),
            },
        );
        self
    }

    /// Makes lookups of `video_id` fail with `error`
    pub fn with_failure(mut self, video_id: &str, error: MetadataRetrievalError) -> Self {
        self.failures.insert(video_id.to_string(), error);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl VideoPlatformApi for FakeVideoPlatform {
    fn fetch_snippet(&self, video_id: &str) -> Result<Option<VideoSnippet>, MetadataRetrievalError> {
        self.calls.lock().unwrap().push(format!("snippet:{}", video_id));
        if let Some(error) = self.failures.get(video_id) {
            return Err(error.clone());
        }
        Ok(self.snippets.get(video_id).cloned())
    }
}
