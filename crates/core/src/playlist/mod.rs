//! Themed playlist lookup.
//!
//! Getting a playlist takes two collaborators: an [`Authorizer`] that issues a
//! bearer token and a [`CatalogSearch`] that finds a playlist for a free-text
//! query and lists its tracks. [`PlaylistOrchestrator`] chains them and
//! projects the result.

mod orchestrator;
mod spotify;
mod types;

pub use orchestrator::{PlaylistOrchestrator, DEFAULT_CALL_TIMEOUT};
pub use spotify::SpotifyClient;
pub use types::*;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by the upstream services themselves.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The call did not finish in time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// API returned an error status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Response parsed but lacks a required field.
    #[error("Missing field in response: {0}")]
    MissingField(String),

    /// Client not configured (missing credentials, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Playlist pipeline failures. Sub-causes are kept for logging only.
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("Token acquisition failed: {0}")]
    TokenAcquisition(UpstreamError),

    #[error("Playlist fetch failed: {0}")]
    PlaylistFetch(UpstreamError),
}

/// Issues bearer credentials for the catalog API.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn issue_token(&self) -> Result<String, UpstreamError>;
}

/// Music catalog playlist search.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Search playlists by free text, asking for a single result.
    async fn search_playlist(
        &self,
        token: &str,
        query: &str,
    ) -> Result<Option<PlaylistRef>, UpstreamError>;

    /// Fetch the track listing behind a [`PlaylistRef::tracks_href`].
    async fn fetch_tracks(
        &self,
        token: &str,
        tracks_href: &str,
    ) -> Result<Vec<CatalogTrackEntry>, UpstreamError>;
}
