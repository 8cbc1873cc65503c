//! Streaming provider resolution
//!
//! TMDB's official watch provider listing is often missing for new shows, so
//! providers are resolved through a cascade of sources:
//!
//! 1. the official listing for the configured country,
//! 2. keywords in the show's synopsis and network names,
//! 3. keywords in the title, description and channel of the show's trailer.
//!
//! Each tier is only consulted if every earlier tier came up empty. Failures
//! inside a tier are logged and treated as "nothing found".

mod keywords;

use crate::config::Config;
use crate::metadata_retrieval::{CatalogApi, Provider, VideoPlatformApi};
use keywords::{SHOW_KEYWORDS, TRAILER_KEYWORDS, match_keywords, match_network};

/// One tier of the cascade
type Tier<'t> = (&'static str, &'t dyn Fn() -> Option<Vec<Provider>>);

/// Resolves the streaming providers of a show.
pub(crate) struct ProviderResolver<'a, C: CatalogApi, V: VideoPlatformApi> {
    catalog: &'a C,
    platform: &'a V,
    language: &'a str,
    region: &'a str,
}

impl<'a, C: CatalogApi, V: VideoPlatformApi> ProviderResolver<'a, C, V> {
    pub fn new(catalog: &'a C, platform: &'a V, config: &'a Config) -> Self {
        Self {
            catalog,
            platform,
            language: &config.language,
            region: &config.region,
        }
    }

    /// Returns the providers of a show, or `None` if no tier found any.
    ///
    /// `trailer` is only invoked when the last tier is reached. It yields the
    /// YouTube key whose metadata is mined.
    pub fn resolve(
        &self,
        show_id: u64,
        trailer: &dyn Fn() -> Option<String>,
    ) -> Option<Vec<Provider>> {
        let tiers: [Tier<'_>; 3] = [
            ("official listing", &|| self.from_official_listing(show_id)),
            ("show details", &|| self.from_show_details(show_id)),
            ("trailer metadata", &|| {
                trailer().and_then(|key| self.from_trailer_metadata(show_id, &key))
            }),
        ];

        tiers.iter().find_map(|(tier, attempt)| {
            let providers = attempt().filter(|providers| !providers.is_empty())?;
            tracing::debug!(show_id, tier, count = providers.len(), "providers found");
            Some(providers)
        })
    }

    fn from_official_listing(&self, show_id: u64) -> Option<Vec<Provider>> {
        match self.catalog.fetch_watch_providers(show_id) {
            Ok(listing) => listing.flatrate(self.region).map(<[Provider]>::to_vec),
            Err(e) => {
                tracing::debug!(show_id, error = %e, "watch provider listing unavailable");
                None
            }
        }
    }

    fn from_show_details(&self, show_id: u64) -> Option<Vec<Provider>> {
        let details = match self.catalog.fetch_show_details(show_id, self.language) {
            Ok(details) => details,
            Err(e) => {
                tracing::debug!(show_id, error = %e, "show details unavailable");
                return None;
            }
        };

        let networks = details
            .networks
            .iter()
            .map(|network| network.name.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        let text = format!("{} {}", details.overview.to_lowercase(), networks);

        let providers = match_keywords(&text, SHOW_KEYWORDS);
        if !providers.is_empty() {
            return Some(providers);
        }

        let mut providers: Vec<Provider> = Vec::new();
        for provider in details
            .networks
            .iter()
            .filter_map(|network| match_network(&network.name))
        {
            if !providers.contains(&provider) {
                providers.push(provider);
            }
        }

        Some(providers)
    }

    fn from_trailer_metadata(&self, show_id: u64, video_id: &str) -> Option<Vec<Provider>> {
        let snippet = match self.platform.fetch_snippet(video_id) {
            Ok(snippet) => snippet?,
            Err(e) => {
                tracing::debug!(show_id, video_id, error = %e, "video metadata unavailable");
                return None;
            }
        };

        let text = [
            snippet.title.as_str(),
            snippet.description.as_str(),
            snippet.channel_title.as_str(),
        ]
        .join(" ")
        .to_lowercase();

        Some(match_keywords(&text, TRAILER_KEYWORDS))
    }
}
