//! Catalog orchestration
//!
//! Fetches the top shows for a time window and enriches each of them with a
//! trailer and its streaming providers.

use crate::ProgressEvent;
use crate::config::Config;
use crate::metadata_retrieval::{
    CatalogApi, CatalogQuery, MetadataRetrievalError, Provider, Show, TrendingPeriod,
    VideoPlatformApi,
};
use crate::trailer::TrailerResolver;
use crate::watch_providers::ProviderResolver;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of shows kept from a catalog listing
pub const TOP_SHOW_COUNT: usize = 5;

/// Time span the top shows are picked from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    /// Trending today
    Day,
    /// Trending this week
    #[default]
    Week,
    /// Popular shows that premiered in the last 60 days
    Month,
}

impl TimeWindow {
    /// All windows in display order
    pub const ALL: [TimeWindow; 3] = [TimeWindow::Day, TimeWindow::Week, TimeWindow::Month];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
        }
    }

    /// Label shown to the user
    pub fn display_name(&self) -> &'static str {
        match self {
            TimeWindow::Day => "Hoje",
            TimeWindow::Week => "Esta Semana",
            TimeWindow::Month => "Este Mês",
        }
    }

    /// The catalog query answering this window on the given day
    pub fn query(&self, today: NaiveDate) -> CatalogQuery {
        match self {
            TimeWindow::Day => CatalogQuery::Trending(TrendingPeriod::Day),
            TimeWindow::Week => CatalogQuery::Trending(TrendingPeriod::Week),
            TimeWindow::Month => CatalogQuery::discover_until(today),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown time window name
#[derive(Debug, Error)]
#[error("Unknown time window '{0}', expected one of: day, week, month")]
pub struct ParseTimeWindowError(String);

impl FromStr for TimeWindow {
    type Err = ParseTimeWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeWindow::ALL
            .into_iter()
            .find(|window| window.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTimeWindowError(s.to_string()))
    }
}

/// Fetches and enriches top shows from a catalog and a video platform.
pub struct Catalog<C, V> {
    catalog: C,
    platform: V,
    config: Config,
}

impl<C: CatalogApi, V: VideoPlatformApi> Catalog<C, V> {
    /// Creates a new catalog over the given clients
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use top_series::{Catalog, Config, TimeWindow, TmdbClient, YouTubeClient};
    ///
    /// let config = Config::new("tmdb-token", None);
    /// let catalog = Catalog::new(
    ///     TmdbClient::new(config.clone()).unwrap(),
    ///     YouTubeClient::new(&config).unwrap(),
    ///     config,
    /// );
    /// let shows = catalog.fetch_top_shows(TimeWindow::Week, |_| {}).unwrap();
    /// ```
    pub fn new(catalog: C, platform: V, config: Config) -> Self {
        Self {
            catalog,
            platform,
            config,
        }
    }

    /// Resolves the trailer of a single show
    pub fn resolve_trailer(&self, show_id: u64) -> Option<String> {
        TrailerResolver::new(&self.catalog, &self.config).resolve(show_id)
    }

    /// Resolves the providers of a single show.
    ///
    /// If the trailer tier is reached, the trailer is looked up afresh.
    pub fn resolve_providers(&self, show_id: u64) -> Option<Vec<Provider>> {
        ProviderResolver::new(&self.catalog, &self.platform, &self.config)
            .resolve(show_id, &|| self.resolve_trailer(show_id))
    }

    /// Fetches the top shows of a window as of today.
    ///
    /// See [`Catalog::fetch_top_shows_on`].
    pub fn fetch_top_shows<F>(
        &self,
        window: TimeWindow,
        progress_callback: F,
    ) -> Result<Vec<Show>, MetadataRetrievalError>
    where
        F: FnMut(ProgressEvent),
    {
        let today = chrono::Local::now().date_naive();
        self.fetch_top_shows_on(window, today, progress_callback)
    }

    /// Fetches the top shows of a window and enriches them.
    ///
    /// At most [`TOP_SHOW_COUNT`] shows are kept, in the catalog's order. Shows
    /// are enriched one after another; trailer and provider lookups never fail
    /// the fetch, they just leave the field empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing itself cannot be fetched or decoded.
    pub fn fetch_top_shows_on<F>(
        &self,
        window: TimeWindow,
        today: NaiveDate,
        mut progress_callback: F,
    ) -> Result<Vec<Show>, MetadataRetrievalError>
    where
        F: FnMut(ProgressEvent),
    {
        progress_callback(ProgressEvent::FetchingCatalog { window });

        let query = window.query(today);
        let mut shows = self.catalog.fetch_shows(&query)?;
        shows.truncate(TOP_SHOW_COUNT);

        progress_callback(ProgressEvent::CatalogFetched { count: shows.len() });
        tracing::info!(%window, count = shows.len(), "catalog fetched");

        let trailers = TrailerResolver::new(&self.catalog, &self.config);
        let providers = ProviderResolver::new(&self.catalog, &self.platform, &self.config);
        let total = shows.len();

        for (index, show) in shows.iter_mut().enumerate() {
            progress_callback(ProgressEvent::EnrichingShow {
                index,
                total,
                name: show.name.clone(),
            });

            let trailer_key = trailers.resolve(show.id);
            // The trailer tier reuses the key resolved above
            let watch_providers = providers.resolve(show.id, &|| trailer_key.clone());

            if show.trailer_key.is_none() {
                show.trailer_key = trailer_key;
            }
            show.watch_providers = watch_providers;

            progress_callback(ProgressEvent::ShowEnriched {
                index,
                total,
                has_trailer: show.trailer_key.is_some(),
                provider_count: show.watch_providers.as_ref().map_or(0, Vec::len),
            });
        }

        progress_callback(ProgressEvent::Complete { count: total });

        Ok(shows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeCatalog, FakeVideoPlatform, details, show, video};

    fn config() -> Config {
        Config::new("token", Some("key".to_string()))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 18).unwrap()
    }

    #[test]
    fn test_time_window_parsing() {
        assert_eq!("day".parse::<TimeWindow>().unwrap(), TimeWindow::Day);
        assert_eq!(" Month ".parse::<TimeWindow>().unwrap(), TimeWindow::Month);
        assert!("year".parse::<TimeWindow>().is_err());
        assert_eq!(TimeWindow::default(), TimeWindow::Week);
        assert_eq!(TimeWindow::Month.display_name(), "Este Mês");
    }

    #[test]
    fn test_query_mode_per_window() {
        assert_eq!(
            TimeWindow::Day.query(today()),
            CatalogQuery::Trending(TrendingPeriod::Day)
        );
        assert_eq!(
            TimeWindow::Week.query(today()),
            CatalogQuery::Trending(TrendingPeriod::Week)
        );
        assert_eq!(
            TimeWindow::Month.query(today()),
            CatalogQuery::Discover {
                from: NaiveDate::from_ymd_opt(2024, 8, 19).unwrap(),
                to: today(),
            }
        );
    }

    #[test]
    fn test_keeps_first_five_in_catalog_order() {
        let shows = (1..=8).rev().map(|id| show(id, &format!("Show {}", id))).collect();
        let catalog = FakeCatalog::new().with_shows(shows);
        let platform = FakeVideoPlatform::new();
        let top = Catalog::new(&catalog, &platform, config());

        for window in TimeWindow::ALL {
            let result = top.fetch_top_shows_on(window, today(), |_| {}).unwrap();
            let ids: Vec<u64> = result.iter().map(|s| s.id).collect();
            assert_eq!(ids, vec![8, 7, 6, 5, 4]);
        }

        assert_eq!(
            catalog.queries(),
            vec![
                TimeWindow::Day.query(today()),
                TimeWindow::Week.query(today()),
                TimeWindow::Month.query(today()),
            ]
        );
    }

    #[test]
    fn test_enriches_each_show_in_order() {
        let catalog = FakeCatalog::new()
            .with_shows(vec![show(1, "Um"), show(2, "Dois")])
            .with_videos(1, "pt-BR", vec![video("t1", "Trailer", "Trailer Legendado")])
            .with_flatrate(1, "BR", vec![Provider::new("Netflix", "/n.jpg")])
            .with_details(2, details("Drama.", &["BBC"]));
        let platform = FakeVideoPlatform::new();
        let top = Catalog::new(&catalog, &platform, config());

        let shows = top.fetch_top_shows_on(TimeWindow::Week, today(), |_| {}).unwrap();

        assert_eq!(shows[0].trailer_key.as_deref(), Some("t1"));
        assert_eq!(
            shows[0].watch_providers,
            Some(vec![Provider::new("Netflix", "/n.jpg")])
        );
        assert_eq!(shows[1].trailer_key, None);
        assert_eq!(shows[1].watch_providers, None);

        assert_eq!(
            catalog.calls(),
            vec![
                "shows",
                "videos:1:pt-BR",
                "providers:1",
                "videos:2:pt-BR",
                "videos:2:en-US",
                "providers:2",
                "details:2:pt-BR",
            ]
        );
        // No trailer for show 2, so its trailer metadata is never requested
        assert!(platform.calls().is_empty());
    }

    #[test]
    fn test_trailer_tier_reuses_resolved_trailer() {
        let catalog = FakeCatalog::new()
            .with_shows(vec![show(1, "Um")])
            .with_videos(1, "pt-BR", vec![video("t1", "Teaser", "Teaser")])
            .with_details(1, details("", &[]));
        let platform =
            FakeVideoPlatform::new().with_snippet("t1", "Teaser", "Exclusivo Netflix", "Netflix Brasil");
        let top = Catalog::new(&catalog, &platform, config());

        let shows = top.fetch_top_shows_on(TimeWindow::Day, today(), |_| {}).unwrap();

        let names: Vec<&str> = shows[0]
            .watch_providers
            .iter()
            .flatten()
            .map(|p| p.display_name())
            .collect();
        assert_eq!(names, vec!["Netflix"]);
        let video_calls = catalog
            .calls()
            .into_iter()
            .filter(|call| call.starts_with("videos:"))
            .count();
        assert_eq!(video_calls, 1);
        assert_eq!(platform.calls(), vec!["snippet:t1"]);
    }

    #[test]
    fn test_standalone_provider_lookup_resolves_trailer_afresh() {
        let catalog = FakeCatalog::new()
            .with_videos(1, "pt-BR", vec![video("t1", "Trailer", "Trailer")])
            .with_details(1, details("", &[]));
        let platform = FakeVideoPlatform::new().with_snippet("t1", "Trailer", "", "Paramount Plus");
        let top = Catalog::new(&catalog, &platform, config());

        let providers = top.resolve_providers(1).unwrap();
        assert_eq!(providers[0].display_name(), "Paramount+");
        assert_eq!(
            catalog.calls(),
            vec!["providers:1", "details:1:pt-BR", "videos:1:pt-BR"]
        );
    }

    #[test]
    fn test_listing_error_aborts_cycle() {
        let catalog = FakeCatalog::new().with_listing_error("Invalid API key: You must be granted a valid key.");
        let platform = FakeVideoPlatform::new();
        let top = Catalog::new(&catalog, &platform, config());

        let result = top.fetch_top_shows_on(TimeWindow::Week, today(), |_| {});
        match result {
            Err(MetadataRetrievalError::InvalidResponse(message)) => {
                assert!(message.starts_with("Invalid API key"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(catalog.calls(), vec!["shows"]);
    }

    #[test]
    fn test_progress_events() {
        let catalog = FakeCatalog::new().with_shows(vec![show(1, "Um"), show(2, "Dois")]);
        let platform = FakeVideoPlatform::new();
        let top = Catalog::new(&catalog, &platform, config());

        let mut events = Vec::new();
        top.fetch_top_shows_on(TimeWindow::Week, today(), |event| events.push(event))
            .unwrap();

        assert!(matches!(
            events.first(),
            Some(ProgressEvent::FetchingCatalog {
                window: TimeWindow::Week
            })
        ));
        assert!(matches!(events[1], ProgressEvent::CatalogFetched { count: 2 }));
        assert!(matches!(
            events.last(),
            Some(ProgressEvent::Complete { count: 2 })
        ));
        let enriched = events
            .iter()
            .filter(|event| matches!(event, ProgressEvent::ShowEnriched { .. }))
            .count();
        assert_eq!(enriched, 2);
    }
}
