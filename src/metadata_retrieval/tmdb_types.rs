/// TMDB API envelope types for deserialization.
///
/// These structures mirror the JSON response format of the TMDB v3 API.
use super::{Show, Video};
use serde::Deserialize;

/// Response of the trending and discover endpoints.
#[derive(Debug, Deserialize)]
pub(super) struct TmdbShowPage {
    /// Shows in the order TMDB ranks them
    pub results: Vec<Show>,
}

/// Response of the videos endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TmdbVideoList {
    pub results: Vec<Video>,
}

/// Error body sent along with non-success statuses.
#[derive(Debug, Deserialize)]
pub(super) struct TmdbErrorBody {
    pub status_message: String,
}
