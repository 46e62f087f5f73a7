//! Party planning: temperature in, beer style and playlist out.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::beer::{BeerError, BeerStore};
use crate::matcher::select_closest;
use crate::metrics::{CANDIDATES_FOUND, PARTY_OUTCOMES};
use crate::playlist::{Playlist, PlaylistError, PlaylistOrchestrator};

/// Successful party plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub beer_style: String,
    pub playlist: Playlist,
}

/// Ways a party plan can fail.
///
/// The two not-found variants carry the message shown to callers. `Store`
/// and `Playlist` keep their cause for logging; callers only ever see a
/// generic message for them.
#[derive(Debug, Error)]
pub enum PartyError {
    #[error("Nenhuma cerveja encontrada")]
    NoBeerFound,

    #[error("Nenhuma playlist encontrada para: {beer_style}")]
    NoPlaylistFound { beer_style: String },

    #[error("Beer store failed: {0}")]
    Store(#[from] BeerError),

    #[error(transparent)]
    Playlist(#[from] PlaylistError),
}

impl PartyError {
    /// Label used for the outcome metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            PartyError::NoBeerFound => "no_beer",
            PartyError::NoPlaylistFound { .. } => "no_playlist",
            PartyError::Store(_) => "store_error",
            PartyError::Playlist(_) => "playlist_error",
        }
    }

    /// Whether this is a not-found outcome rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PartyError::NoBeerFound | PartyError::NoPlaylistFound { .. }
        )
    }
}

/// Coordinates the beer store and the playlist orchestrator.
pub struct PartyPlanner {
    store: Arc<dyn BeerStore>,
    playlists: PlaylistOrchestrator,
}

impl PartyPlanner {
    pub fn new(store: Arc<dyn BeerStore>, playlists: PlaylistOrchestrator) -> Self {
        Self { store, playlists }
    }

    /// Pick the beer for `temperature` and fetch a playlist for its style.
    ///
    /// Candidates are taken as returned by the store; they are not filtered
    /// again here. The token is requested only after a beer was chosen, and
    /// the playlist is fetched only after a token was issued.
    pub async fn plan(&self, temperature: f64) -> Result<MatchResult, PartyError> {
        let result = self.run(temperature).await;

        let outcome = match &result {
            Ok(_) => "matched",
            Err(e) => e.outcome(),
        };
        PARTY_OUTCOMES.with_label_values(&[outcome]).inc();

        result
    }

    async fn run(&self, temperature: f64) -> Result<MatchResult, PartyError> {
        let candidates = self.store.find_by_temperature(temperature)?;
        CANDIDATES_FOUND.observe(candidates.len() as f64);

        let beer = select_closest(&candidates, temperature).ok_or(PartyError::NoBeerFound)?;
        debug!(
            "Temperature {} matched '{}' out of {} candidates",
            temperature,
            beer.beer_style,
            candidates.len()
        );

        let token = self.playlists.acquire_token().await?;
        let playlist = self
            .playlists
            .fetch_playlist(&token, &beer.beer_style)
            .await?
            .ok_or_else(|| PartyError::NoPlaylistFound {
                beer_style: beer.beer_style.clone(),
            })?;

        info!(
            "Party planned: temperature={}, style='{}', playlist='{}' ({} tracks)",
            temperature,
            beer.beer_style,
            playlist.name,
            playlist.tracks.len()
        );

        Ok(MatchResult {
            beer_style: beer.beer_style.clone(),
            playlist,
        })
    }
}
