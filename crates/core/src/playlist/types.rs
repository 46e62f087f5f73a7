//! Playlist types, both the projected shape returned to callers and the
//! upstream shapes the catalog search collaborator hands back.

use serde::{Deserialize, Serialize};

/// A themed playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    pub tracks: Vec<Track>,
}

/// A playlist track reduced to what the party response exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    /// First listed artist.
    pub artist: String,
    /// External profile link of the first listed artist.
    pub link: String,
}

/// A playlist found by the catalog search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistRef {
    pub name: String,
    /// Where the playlist's track listing lives.
    pub tracks_href: String,
}

/// One entry of an upstream track listing.
///
/// Every field is optional so a malformed entry still deserializes; the
/// orchestrator rejects it when projecting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogTrackEntry {
    #[serde(default)]
    pub track: Option<CatalogTrack>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogTrack {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<CatalogArtist>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogArtist {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    /// Public profile URL (`external_urls.spotify` in Spotify payloads).
    #[serde(default, rename = "spotify", alias = "profile")]
    pub profile: Option<String>,
}

impl CatalogTrackEntry {
    /// Build a complete entry, mostly for tests and mocks.
    pub fn new(name: &str, artist: &str, link: &str) -> Self {
        Self {
            track: Some(CatalogTrack {
                name: Some(name.to_string()),
                artists: vec![CatalogArtist {
                    name: Some(artist.to_string()),
                    external_urls: ExternalUrls {
                        profile: Some(link.to_string()),
                    },
                }],
            }),
        }
    }

    /// Project to a [`Track`], taking only the first artist.
    ///
    /// Returns the path of the first missing field on failure.
    pub fn project(&self) -> Result<Track, &'static str> {
        let track = self.track.as_ref().ok_or("track")?;
        let name = track.name.as_ref().ok_or("track.name")?;
        let artist = track.artists.first().ok_or("track.artists")?;
        let artist_name = artist.name.as_ref().ok_or("track.artists[0].name")?;
        let link = artist
            .external_urls
            .profile
            .as_ref()
            .ok_or("track.artists[0].external_urls")?;

        Ok(Track {
            name: name.clone(),
            artist: artist_name.clone(),
            link: link.clone(),
        })
    }
}
