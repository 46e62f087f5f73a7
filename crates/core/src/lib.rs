pub mod beer;
pub mod config;
pub mod matcher;
pub mod metrics;
pub mod party;
pub mod playlist;
pub mod testing;
pub mod validation;

pub use beer::{BeerError, BeerRecord, BeerStore, BeerUpdate, NewBeer, SqliteBeerStore};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    SpotifyConfig,
};
pub use matcher::{filter_candidates, select_closest};
pub use party::{MatchResult, PartyError, PartyPlanner};
pub use playlist::{
    Authorizer, CatalogSearch, Playlist, PlaylistError, PlaylistOrchestrator, SpotifyClient,
    Track, UpstreamError,
};
pub use validation::{validate_beer_update, validate_new_beer, validate_party, ValidationError};
