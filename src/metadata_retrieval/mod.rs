/// Data structures and traits for TV show metadata retrieval.
///
/// This module provides structures to represent shows, streaming providers and
/// videos as delivered by the catalog API, as well as traits for implementing
/// the clients that fetch them.
mod tmdb;
mod tmdb_types;
mod youtube;
mod youtube_types;

pub use tmdb::TmdbClient;
pub use youtube::YouTubeClient;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Base URL for poster images
const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Base URL for full size images (backdrops and provider logos)
const ORIGINAL_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

/// Label shown for providers without a name
pub const UNKNOWN_PROVIDER_LABEL: &str = "Não disponível";

/// Errors that can occur during metadata retrieval operations.
#[derive(Debug, Clone, Error)]
pub enum MetadataRetrievalError {
    /// The request could not be sent or no response arrived
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The API answered with a non-success status
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The response body did not match the expected shape
    #[error("Failed to decode API response: {0}")]
    DecodingError(String),
}

/// Error message for a non-success response whose body carries no message
fn status_code_message(status: u16) -> String {
    format!("Status code: {}", status)
}

/// A streaming service a show can be watched on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Path of the provider logo, relative to the TMDB image host
    pub logo_path: Option<String>,
    /// Display name of the provider
    pub provider_name: Option<String>,
}

impl Provider {
    pub fn new(provider_name: &str, logo_path: &str) -> Self {
        Self {
            logo_path: Some(logo_path.to_string()),
            provider_name: Some(provider_name.to_string()),
        }
    }

    /// Identity used for listing providers.
    ///
    /// Nameless providers get a fresh ULID on every call; it only keeps list
    /// entries distinct and carries no durable meaning.
    pub fn id(&self) -> String {
        self.provider_name
            .clone()
            .unwrap_or_else(|| ulid::Ulid::new().to_string())
    }

    /// Name to display, falling back to a placeholder label
    pub fn display_name(&self) -> &str {
        self.provider_name.as_deref().unwrap_or(UNKNOWN_PROVIDER_LABEL)
    }

    pub fn logo_url(&self) -> Option<String> {
        image_url(ORIGINAL_IMAGE_BASE_URL, self.logo_path.as_deref())
    }
}

/// A TV show from the catalog, possibly enriched with a trailer and providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: u64,
    /// Localized show name
    pub name: String,
    pub original_name: Option<String>,
    /// Synopsis in the requested language (may be empty)
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    /// First air date as `yyyy-MM-dd`
    pub first_air_date: Option<String>,
    /// Average rating between 0 and 10
    pub vote_average: Option<f64>,
    /// YouTube key of the resolved trailer
    #[serde(rename = "trailerKey", default)]
    pub trailer_key: Option<String>,
    /// Streaming providers, never an empty list
    #[serde(rename = "watchProviders", default)]
    pub watch_providers: Option<Vec<Provider>>,
}

impl Show {
    pub fn poster_url(&self) -> Option<String> {
        image_url(POSTER_BASE_URL, self.poster_path.as_deref())
    }

    pub fn backdrop_url(&self) -> Option<String> {
        image_url(ORIGINAL_IMAGE_BASE_URL, self.backdrop_path.as_deref())
    }

    /// Rating with one decimal, or "N/A" if the show has none
    pub fn formatted_rating(&self) -> String {
        match self.vote_average {
            Some(rating) => format!("{:.1}", rating),
            None => "N/A".to_string(),
        }
    }

    /// First air date as `dd/MM/yyyy`
    pub fn formatted_first_air_date(&self) -> String {
        self.first_air_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
            .map(|date| date.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "Data não disponível".to_string())
    }

    pub fn trailer_url(&self) -> Option<String> {
        self.trailer_key
            .as_ref()
            .map(|key| format!("https://www.youtube.com/watch?v={}", key))
    }

    /// URL for embedding the trailer in a player, with Portuguese captions preferred
    pub fn trailer_embed_url(&self) -> Option<String> {
        self.trailer_key.as_ref().map(|key| {
            format!(
                "https://www.youtube.com/embed/{}?rel=0&playsinline=1&hl=pt&cc_lang_pref=pt&cc_load_policy=1&modestbranding=1",
                key
            )
        })
    }
}

/// A video attached to a show (trailer, teaser, clip, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Identifier on the hosting site
    pub key: String,
    /// Hosting site, e.g. "YouTube"
    pub site: String,
    /// Content type tag, e.g. "Trailer" or "Featurette"
    #[serde(rename = "type")]
    pub kind: String,
    /// Video title
    pub name: String,
}

/// Watch provider availability for one country
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionProviders {
    /// Subscription based providers
    pub flatrate: Option<Vec<Provider>>,
}

/// Watch provider listing of a show, keyed by country code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchProviderListing {
    pub results: HashMap<String, RegionProviders>,
}

impl WatchProviderListing {
    /// Returns the subscription providers for a country, if any exist
    pub fn flatrate(&self, region: &str) -> Option<&[Provider]> {
        self.results
            .get(region)
            .and_then(|providers| providers.flatrate.as_deref())
            .filter(|providers| !providers.is_empty())
    }
}

/// Broadcast network of a show
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Network {
    pub name: String,
}

/// The parts of a show's detail record used to guess its providers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShowDetails {
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub networks: Vec<Network>,
}

/// Descriptive text of a video on the video platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSnippet {
    pub title: String,
    pub description: String,
    pub channel_title: String,
}

/// Trending period accepted by the trending endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingPeriod {
    Day,
    Week,
}

impl TrendingPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingPeriod::Day => "day",
            TrendingPeriod::Week => "week",
        }
    }
}

/// One catalog listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogQuery {
    /// Shows trending over the given period
    Trending(TrendingPeriod),
    /// Popular recently premiered shows, first aired between `from` and `to` inclusive
    Discover { from: NaiveDate, to: NaiveDate },
}

/// Trait for clients of the show catalog API.
///
/// Implementors fetch listings and per-show records from a catalog such as
/// TMDB. They perform no business logic beyond decoding.
pub trait CatalogApi {
    /// Fetches a show listing in the configured language.
    ///
    /// # Errors
    ///
    /// `InvalidResponse` for non-success statuses (carrying the API's status
    /// message when it sent one), `DecodingError` for unexpected bodies and
    /// `RequestError` for transport failures.
    fn fetch_shows(&self, query: &CatalogQuery) -> Result<Vec<Show>, MetadataRetrievalError>;

    /// Fetches the videos attached to a show in the given language.
    fn fetch_videos(
        &self,
        show_id: u64,
        language: &str,
    ) -> Result<Vec<Video>, MetadataRetrievalError>;

    /// Fetches the official watch provider listing of a show.
    fn fetch_watch_providers(
        &self,
        show_id: u64,
    ) -> Result<WatchProviderListing, MetadataRetrievalError>;

    /// Fetches synopsis and networks of a show in the given language.
    fn fetch_show_details(
        &self,
        show_id: u64,
        language: &str,
    ) -> Result<ShowDetails, MetadataRetrievalError>;
}

/// Trait for clients of the platform hosting the trailers.
pub trait VideoPlatformApi {
    /// Fetches the descriptive text of a video.
    ///
    /// Returns `Ok(None)` if the platform knows no such video.
    fn fetch_snippet(&self, video_id: &str) -> Result<Option<VideoSnippet>, MetadataRetrievalError>;
}

impl<T: CatalogApi + ?Sized> CatalogApi for &T {
    fn fetch_shows(&self, query: &CatalogQuery) -> Result<Vec<Show>, MetadataRetrievalError> {
        (**self).fetch_shows(query)
    }

    fn fetch_videos(
        &self,
        show_id: u64,
        language: &str,
    ) -> Result<Vec<Video>, MetadataRetrievalError> {
        (**self).fetch_videos(show_id, language)
    }

    fn fetch_watch_providers(
        &self,
        show_id: u64,
    ) -> Result<WatchProviderListing, MetadataRetrievalError> {
        (**self).fetch_watch_providers(show_id)
    }

    fn fetch_show_details(
        &self,
        show_id: u64,
        language: &str,
    ) -> Result<ShowDetails, MetadataRetrievalError> {
        (**self).fetch_show_details(show_id, language)
    }
}

impl<T: VideoPlatformApi + ?Sized> VideoPlatformApi for &T {
    fn fetch_snippet(&self, video_id: &str) -> Result<Option<VideoSnippet>, MetadataRetrievalError> {
        (**self).fetch_snippet(video_id)
    }
}

fn image_url(base: &str, path: Option<&str>) -> Option<String> {
    path.filter(|path| !path.is_empty())
        .map(|path| format!("{}{}", base, path))
}
