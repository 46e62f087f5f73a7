use std::sync::Arc;

use beerparty_core::{BeerStore, Config, PartyPlanner, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    store: Arc<dyn BeerStore>,
    /// Absent when no playlist provider is configured.
    party: Option<PartyPlanner>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn BeerStore>, party: Option<PartyPlanner>) -> Self {
        Self {
            config,
            store,
            party,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn store(&self) -> &dyn BeerStore {
        self.store.as_ref()
    }

    pub fn party(&self) -> Option<&PartyPlanner> {
        self.party.as_ref()
    }
}
