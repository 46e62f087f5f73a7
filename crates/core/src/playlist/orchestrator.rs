//! Token -> search -> tracks pipeline.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::{Authorizer, CatalogSearch, Playlist, PlaylistError, Track, UpstreamError};
use crate::metrics::{UPSTREAM_DURATION, UPSTREAM_REQUESTS};

/// Timeout applied to each external call unless configured otherwise.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetches a playlist for a beer style through the injected collaborators.
///
/// Every call runs in sequence: the search needs the token and the track
/// listing needs the search hit. Nothing is cached or retried.
pub struct PlaylistOrchestrator {
    authorizer: Arc<dyn Authorizer>,
    search: Arc<dyn CatalogSearch>,
    call_timeout: Duration,
}

impl PlaylistOrchestrator {
    pub fn new(authorizer: Arc<dyn Authorizer>, search: Arc<dyn CatalogSearch>) -> Self {
        Self {
            authorizer,
            search,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Bound each external call by `timeout`.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    /// Get a bearer token from the authorizer.
    pub async fn acquire_token(&self) -> Result<String, PlaylistError> {
        bounded("issue_token", self.call_timeout, self.authorizer.issue_token())
            .await
            .map_err(PlaylistError::TokenAcquisition)
    }

    /// Find one playlist for `style` and project its tracks.
    ///
    /// `Ok(None)` means the search came back empty.
    pub async fn fetch_playlist(
        &self,
        token: &str,
        style: &str,
    ) -> Result<Option<Playlist>, PlaylistError> {
        let found = bounded(
            "search_playlist",
            self.call_timeout,
            self.search.search_playlist(token, style),
        )
        .await
        .map_err(PlaylistError::PlaylistFetch)?;

        let Some(playlist_ref) = found else {
            debug!("No playlist found for style '{}'", style);
            return Ok(None);
        };

        debug!(
            "Playlist '{}' found for style '{}', fetching tracks",
            playlist_ref.name, style
        );

        let entries = bounded(
            "fetch_tracks",
            self.call_timeout,
            self.search.fetch_tracks(token, &playlist_ref.tracks_href),
        )
        .await
        .map_err(PlaylistError::PlaylistFetch)?;

        let tracks = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry.project().map_err(|field| {
                    PlaylistError::PlaylistFetch(UpstreamError::MissingField(format!(
                        "items[{}].{}",
                        index, field
                    )))
                })
            })
            .collect::<Result<Vec<Track>, _>>()?;

        Ok(Some(Playlist {
            name: playlist_ref.name,
            tracks,
        }))
    }
}

/// Run one external call under a timeout and record its metrics.
async fn bounded<T, F>(operation: &str, limit: Duration, call: F) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    let start = Instant::now();

    let (result, status) = match tokio::time::timeout(limit, call).await {
        Ok(Ok(value)) => (Ok(value), "success"),
        Ok(Err(e)) => (Err(e), "error"),
        Err(_) => (Err(UpstreamError::Timeout(limit)), "timeout"),
    };

    UPSTREAM_DURATION
        .with_label_values(&[operation])
        .observe(start.elapsed().as_secs_f64());
    UPSTREAM_REQUESTS
        .with_label_values(&[operation, status])
        .inc();

    if let Err(ref e) = result {
        warn!("Upstream call '{}' failed: {}", operation, e);
    }

    result
}
