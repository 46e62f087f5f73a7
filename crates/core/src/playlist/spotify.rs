//! Spotify Web API client.
//!
//! Uses the client credentials flow: one token request per party, then a
//! playlist search and a track listing fetch with that bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{Authorizer, CatalogSearch, CatalogTrackEntry, PlaylistRef, UpstreamError};
use crate::config::SpotifyConfig;

const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Spotify API client.
pub struct SpotifyClient {
    client: Client,
    auth_url: String,
    api_base_url: String,
    client_id: String,
    client_secret: String,
}

impl SpotifyClient {
    /// Create a new Spotify client.
    pub fn new(config: SpotifyConfig) -> Result<Self, UpstreamError> {
        if config.client_id.trim().is_empty() || config.client_secret.trim().is_empty() {
            return Err(UpstreamError::NotConfigured(
                "Spotify client credentials are required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let auth_url = config
            .auth_url
            .unwrap_or_else(|| DEFAULT_AUTH_URL.to_string());
        let api_base_url = config
            .api_base_url
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Ok(Self {
            client,
            auth_url,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id,
            client_secret: config.client_secret,
        })
    }

    /// Turn a non-success status into an `ApiError` carrying the body.
    async fn check_status(response: Response) -> Result<Response, UpstreamError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == 429 {
            warn!("Spotify rate limit exceeded");
        }
        let body = response.text().await.unwrap_or_default();
        Err(UpstreamError::ApiError {
            status: status.as_u16(),
            message: body,
        })
    }
}

#[async_trait]
impl Authorizer for SpotifyClient {
    async fn issue_token(&self) -> Result<String, UpstreamError> {
        debug!("Spotify token request: {}", self.auth_url);

        let response = self
            .client
            .post(&self.auth_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let token: SpTokenResponse = response.json().await.map_err(|e| {
            UpstreamError::ParseError(format!("Failed to parse token response: {}", e))
        })?;

        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| UpstreamError::MissingField("access_token".to_string()))
    }
}

#[async_trait]
impl CatalogSearch for SpotifyClient {
    async fn search_playlist(
        &self,
        token: &str,
        query: &str,
    ) -> Result<Option<PlaylistRef>, UpstreamError> {
        let url = format!("{}/search", self.api_base_url);

        debug!("Spotify playlist search: query='{}'", query);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("q", query), ("type", "playlist"), ("limit", "1")])
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let result: SpSearchResponse = response.json().await.map_err(|e| {
            UpstreamError::ParseError(format!("Failed to parse search response: {}", e))
        })?;

        let page = result
            .playlists
            .ok_or_else(|| UpstreamError::MissingField("playlists".to_string()))?;

        // limit=1: an empty page is "no match", a null first hit is unusable
        match page.items.into_iter().next() {
            None => Ok(None),
            Some(None) => Err(UpstreamError::MissingField(
                "playlists.items[0]".to_string(),
            )),
            Some(Some(p)) => Ok(Some(PlaylistRef {
                name: p.name,
                tracks_href: p.href,
            })),
        }
    }

    async fn fetch_tracks(
        &self,
        token: &str,
        tracks_href: &str,
    ) -> Result<Vec<CatalogTrackEntry>, UpstreamError> {
        debug!("Spotify playlist tracks: href={}", tracks_href);

        let response = self
            .client
            .get(tracks_href)
            .bearer_auth(token)
            .query(&[("fields", "name,tracks.items")])
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let playlist: SpPlaylist = response.json().await.map_err(|e| {
            UpstreamError::ParseError(format!("Failed to parse playlist response: {}", e))
        })?;

        playlist
            .tracks
            .map(|t| t.items)
            .ok_or_else(|| UpstreamError::MissingField("tracks".to_string()))
    }
}

// ============================================================================
// Spotify API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SpTokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpSearchResponse {
    #[serde(default)]
    playlists: Option<SpPlaylistPage>,
}

#[derive(Debug, Deserialize)]
struct SpPlaylistPage {
    #[serde(default)]
    items: Vec<Option<SpPlaylistItem>>,
}

#[derive(Debug, Deserialize)]
struct SpPlaylistItem {
    name: String,
    href: String,
}

#[derive(Debug, Deserialize)]
struct SpPlaylist {
    #[serde(default)]
    tracks: Option<SpTrackPage>,
}

#[derive(Debug, Deserialize)]
struct SpTrackPage {
    #[serde(default)]
    items: Vec<CatalogTrackEntry>,
}
