//! Trailer resolution
//!
//! Picks the video to play for a show. Brazilian Portuguese videos are searched
//! first, preferring subtitled over dubbed promotional videos, then any video
//! by type. If the primary language has nothing, the fallback language is
//! searched by type only.

use crate::config::Config;
use crate::metadata_retrieval::{CatalogApi, Video};

/// Site whose videos can be played
const VIDEO_SITE: &str = "YouTube";

/// Title words marking a subtitled video
const SUBTITLED_MARKERS: &[&str] = &["legendado", "leg"];

/// Title words marking a dubbed video
const DUBBED_MARKERS: &[&str] = &["dublado", "dub"];

/// Video types eligible for the subtitled/dubbed searches
const PROMO_TYPES: &[&str] = &["Trailer", "Teaser"];

/// Video types in order of preference
const TYPE_PRIORITY: &[&str] = &["Trailer", "Teaser", "Clip", "Featurette", "Behind the Scenes"];

/// A search over the playable videos of one language
type VideoSearch = for<'v> fn(&'v [Video]) -> Option<&'v Video>;

/// Searches applied to primary language videos, in order
const PRIMARY_SEARCHES: &[VideoSearch] = &[find_subtitled, find_dubbed, find_by_type];

/// Searches applied to fallback language videos, in order
const FALLBACK_SEARCHES: &[VideoSearch] = &[find_by_type];

/// Resolves the trailer of a show from the catalog's video listings.
pub(crate) struct TrailerResolver<'a, C: CatalogApi> {
    catalog: &'a C,
    language: &'a str,
    fallback_language: &'a str,
}

impl<'a, C: CatalogApi> TrailerResolver<'a, C> {
    pub fn new(catalog: &'a C, config: &'a Config) -> Self {
        Self {
            catalog,
            language: &config.language,
            fallback_language: &config.fallback_language,
        }
    }

    /// Returns the YouTube key of the best trailer for the show, if any.
    ///
    /// Each language is fetched only if the previous one yielded nothing.
    /// Failed fetches count as empty listings.
    pub fn resolve(&self, show_id: u64) -> Option<String> {
        let attempts = [
            (self.language, PRIMARY_SEARCHES),
            (self.fallback_language, FALLBACK_SEARCHES),
        ];

        attempts.iter().find_map(|(language, searches)| {
            let videos = self.playable_videos(show_id, language);
            searches
                .iter()
                .find_map(|search| search(&videos))
                .map(|video| {
                    tracing::debug!(show_id, language, key = %video.key, kind = %video.kind, "trailer found");
                    video.key.clone()
                })
        })
    }

    fn playable_videos(&self, show_id: u64, language: &str) -> Vec<Video> {
        match self.catalog.fetch_videos(show_id, language) {
            Ok(videos) => videos
                .into_iter()
                .filter(|video| video.site == VIDEO_SITE)
                .collect(),
            Err(e) => {
                tracing::debug!(show_id, language, error = %e, "video listing unavailable");
                Vec::new()
            }
        }
    }
}

fn is_promo(video: &Video) -> bool {
    PROMO_TYPES.contains(&video.kind.as_str())
}

fn title_contains_any(video: &Video, markers: &[&str]) -> bool {
    let title = video.name.to_lowercase();
    markers.iter().any(|marker| title.contains(marker))
}

fn find_subtitled(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .find(|video| is_promo(video) && title_contains_any(video, SUBTITLED_MARKERS))
}

fn find_dubbed(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .find(|video| is_promo(video) && title_contains_any(video, DUBBED_MARKERS))
}

fn find_by_type(videos: &[Video]) -> Option<&Video> {
    TYPE_PRIORITY
        .iter()
        .find_map(|kind| videos.iter().find(|video| video.kind == *kind))
}
