//! Mock catalog search for testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::playlist::{CatalogSearch, CatalogTrackEntry, PlaylistRef, UpstreamError};

/// A recorded search call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedSearchCall {
    SearchPlaylist { token: String, query: String },
    FetchTracks { token: String, tracks_href: String },
}

/// Mock implementation of the CatalogSearch trait.
///
/// Playlists are registered per query string. Queries with nothing
/// registered come back empty. Errors can target the next call of either
/// operation or only the track listing, and an optional delay lets tests
/// trip the per-call timeout.
#[derive(Debug)]
pub struct MockCatalogSearch {
    /// Search hits by exact query.
    playlists: Arc<RwLock<HashMap<String, PlaylistRef>>>,
    /// Track listings by href.
    tracks: Arc<RwLock<HashMap<String, Vec<CatalogTrackEntry>>>>,
    calls: Arc<RwLock<Vec<RecordedSearchCall>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<UpstreamError>>>,
    /// If set, the next track listing will fail with this error.
    fetch_tracks_error: Arc<RwLock<Option<UpstreamError>>>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl Default for MockCatalogSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalogSearch {
    pub fn new() -> Self {
        Self {
            playlists: Arc::new(RwLock::new(HashMap::new())),
            tracks: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            fetch_tracks_error: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
        }
    }

    /// Register a playlist named `name` as the hit for `query`.
    pub async fn add_playlist(&self, query: &str, name: &str, entries: Vec<CatalogTrackEntry>) {
        let href = format!("mock://playlists/{}", query.to_lowercase().replace(' ', "-"));
        self.tracks.write().await.insert(href.clone(), entries);
        self.playlists.write().await.insert(
            query.to_string(),
            PlaylistRef {
                name: name.to_string(),
                tracks_href: href,
            },
        );
    }

    /// Register a raw search hit. Unknown hrefs list no tracks.
    pub async fn set_playlist_ref(&self, query: &str, playlist_ref: PlaylistRef) {
        self.playlists
            .write()
            .await
            .insert(query.to_string(), playlist_ref);
    }

    /// Make the next operation fail.
    pub async fn set_next_error(&self, error: UpstreamError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make the next track listing fail, leaving the search untouched.
    pub async fn set_fetch_tracks_error(&self, error: UpstreamError) {
        *self.fetch_tracks_error.write().await = Some(error);
    }

    /// Sleep this long before answering either operation.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    pub async fn recorded_calls(&self) -> Vec<RecordedSearchCall> {
        self.calls.read().await.clone()
    }

    async fn take_error(&self) -> Option<UpstreamError> {
        self.next_error.write().await.take()
    }

    async fn wait(&self) {
        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CatalogSearch for MockCatalogSearch {
    async fn search_playlist(
        &self,
        token: &str,
        query: &str,
    ) -> Result<Option<PlaylistRef>, UpstreamError> {
        self.calls.write().await.push(RecordedSearchCall::SearchPlaylist {
            token: token.to_string(),
            query: query.to_string(),
        });
        self.wait().await;

        if let Some(error) = self.take_error().await {
            return Err(error);
        }

        Ok(self.playlists.read().await.get(query).cloned())
    }

    async fn fetch_tracks(
        &self,
        token: &str,
        tracks_href: &str,
    ) -> Result<Vec<CatalogTrackEntry>, UpstreamError> {
        self.calls.write().await.push(RecordedSearchCall::FetchTracks {
            token: token.to_string(),
            tracks_href: tracks_href.to_string(),
        });
        self.wait().await;

        if let Some(error) = self.take_error().await {
            return Err(error);
        }
        if let Some(error) = self.fetch_tracks_error.write().await.take() {
            return Err(error);
        }

        Ok(self
            .tracks
            .read()
            .await
            .get(tracks_href)
            .cloned()
            .unwrap_or_default())
    }
}
