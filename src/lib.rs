//! TopSeries - Trending TV shows and where to watch them
//!
//! This library fetches the top shows of a time window from TMDB and enriches
//! each of them with a playable trailer and the streaming services it is
//! available on, falling back to keyword mining when the official provider
//! listing comes up empty.

mod catalog;
mod config;
mod metadata_retrieval;
mod session;
mod trailer;
mod watch_providers;

#[cfg(test)]
mod test_support;

pub use catalog::{Catalog, ParseTimeWindowError, TOP_SHOW_COUNT, TimeWindow};
pub use config::{Config, TMDB_BASE_URL, YOUTUBE_BASE_URL};
pub use metadata_retrieval::{
    CatalogApi, CatalogQuery, MetadataRetrievalError, Network, Provider, RegionProviders, Show,
    ShowDetails, TmdbClient, TrendingPeriod, UNKNOWN_PROVIDER_LABEL, Video, VideoPlatformApi,
    VideoSnippet, WatchProviderListing, YouTubeClient,
};
pub use session::{CycleTicket, Session, SessionState};

/// Progress event emitted while fetching top shows
///
/// These events allow library users to track progress and provide feedback
/// while the catalog is fetched and each show is enriched.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Requesting the show listing
    FetchingCatalog { window: TimeWindow },

    /// Listing received and cut down to the top shows
    CatalogFetched { count: usize },

    /// Looking up trailer and providers of a show
    EnrichingShow {
        index: usize,
        total: usize,
        name: String,
    },

    /// Trailer and provider lookups of a show finished
    ShowEnriched {
        index: usize,
        total: usize,
        has_trailer: bool,
        provider_count: usize,
    },

    /// All shows enriched
    Complete { count: usize },
}
