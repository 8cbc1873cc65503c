/// TMDB catalog client implementation.
use super::tmdb_types::{TmdbErrorBody, TmdbShowPage, TmdbVideoList};
use super::{
    CatalogApi, CatalogQuery, MetadataRetrievalError, Show, ShowDetails, Video,
    WatchProviderListing, status_code_message,
};
use crate::config::Config;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;

/// Number of days covered by the discover query
const DISCOVER_WINDOW_DAYS: i64 = 60;

/// Catalog client for the TMDB v3 API.
///
/// All requests are authenticated with the configured bearer token and ask
/// for localized text in the configured language.
pub struct TmdbClient {
    client: reqwest::blocking::Client,
    config: Config,
}

impl TmdbClient {
    /// Creates a new TMDB client from the given configuration.
    pub fn new(config: Config) -> Result<Self, MetadataRetrievalError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MetadataRetrievalError::RequestError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Issues an authenticated GET request and decodes the JSON body.
    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MetadataRetrievalError> {
        let url = format!("{}{}", self.config.tmdb_base_url, path);
        tracing::debug!(%url, "requesting TMDB");

        let response = self
            .client
            .get(&url)
            .query(query)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.config.bearer_token)
            .send()
            .map_err(|e| MetadataRetrievalError::RequestError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| MetadataRetrievalError::RequestError(e.to_string()))?;

        if !status.is_success() {
            return Err(MetadataRetrievalError::InvalidResponse(error_message(
                status.as_u16(),
                &body,
            )));
        }

        serde_json::from_str(&body).map_err(|e| MetadataRetrievalError::DecodingError(e.to_string()))
    }
}

/// Extracts the API's status message from an error body.
///
/// Falls back to a generic message naming the status code when the body
/// carries none.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<TmdbErrorBody>(body)
        .map(|error| error.status_message)
        .unwrap_or_else(|_| status_code_message(status))
}

impl CatalogQuery {
    /// Builds the query for the period ending today.
    pub(crate) fn discover_until(today: chrono::NaiveDate) -> Self {
        CatalogQuery::Discover {
            from: today - chrono::Duration::days(DISCOVER_WINDOW_DAYS),
            to: today,
        }
    }

    /// Endpoint path relative to the API base URL
    pub(crate) fn path(&self) -> String {
        match self {
            CatalogQuery::Trending(period) => format!("/trending/tv/{}", period.as_str()),
            CatalogQuery::Discover { .. } => "/discover/tv".to_string(),
        }
    }

    /// Query parameters for the given language and country
    pub(crate) fn params(&self, language: &str, region: &str) -> Vec<(&'static str, String)> {
        match self {
            CatalogQuery::Trending(_) => vec![
                ("language", language.to_string()),
                ("region", region.to_string()),
            ],
            CatalogQuery::Discover { from, to } => vec![
                ("language", language.to_string()),
                ("sort_by", "popularity.desc".to_string()),
                ("with_original_language", "en".to_string()),
                ("vote_count.gte", "20".to_string()),
                ("watch_region", region.to_string()),
                // Scripted series and miniseries
                ("with_type", "2|4".to_string()),
                ("first_air_date.gte", from.format("%Y-%m-%d").to_string()),
                ("first_air_date.lte", to.format("%Y-%m-%d").to_string()),
                // In production or returning
                ("with_status", "0|3".to_string()),
                ("with_release_type", "2|4|6".to_string()),
            ],
        }
    }
}

impl CatalogApi for TmdbClient {
    fn fetch_shows(&self, query: &CatalogQuery) -> Result<Vec<Show>, MetadataRetrievalError> {
        let params = query.params(&self.config.language, &self.config.region);
        let page: TmdbShowPage = self.get_json(&query.path(), &params)?;
        Ok(page.results)
    }

    fn fetch_videos(
        &self,
        show_id: u64,
        language: &str,
    ) -> Result<Vec<Video>, MetadataRetrievalError> {
        let path = format!("/tv/{}/videos", show_id);
        let list: TmdbVideoList = self.get_json(&path, &[("language", language.to_string())])?;
        Ok(list.results)
    }

    fn fetch_watch_providers(
        &self,
        show_id: u64,
    ) -> Result<WatchProviderListing, MetadataRetrievalError> {
        let path = format!("/tv/{}/watch/providers", show_id);
        self.get_json(&path, &[])
    }

    fn fetch_show_details(
        &self,
        show_id: u64,
        language: &str,
    ) -> Result<ShowDetails, MetadataRetrievalError> {
        let path = format!("/tv/{}", show_id);
        self.get_json(
            &path,
            &[
                ("language", language.to_string()),
                ("append_to_response", "keywords,external_ids".to_string()),
            ],
        )
    }
}
