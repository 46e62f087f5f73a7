//! Testing utilities and mock implementations.
//!
//! Mocks for every collaborator the party pipeline depends on, so the
//! coordinator and the HTTP layer can be exercised without a database or
//! network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use beerparty_core::testing::{fixtures, MockAuthorizer, MockBeerStore, MockCatalogSearch};
//!
//! let store = MockBeerStore::with_beers(vec![fixtures::beer_record("IPA", -7.0, 10.0)]);
//! let authorizer = MockAuthorizer::with_token("token");
//! let search = MockCatalogSearch::new();
//! search.add_playlist("IPA", "IPA Classics", vec![fixtures::track_entry(1)]).await;
//! ```

mod mock_authorizer;
mod mock_beer_store;
mod mock_catalog_search;

pub use mock_authorizer::MockAuthorizer;
pub use mock_beer_store::MockBeerStore;
pub use mock_catalog_search::{MockCatalogSearch, RecordedSearchCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::Utc;

    use crate::beer::BeerRecord;
    use crate::playlist::CatalogTrackEntry;

    /// Create a beer record with an id derived from its style.
    pub fn beer_record(style: &str, min_temp: f64, max_temp: f64) -> BeerRecord {
        let now = Utc::now();
        BeerRecord {
            id: format!("beer-{}", style.to_lowercase().replace(' ', "-")),
            beer_style: style.to_string(),
            min_temp,
            max_temp,
            created_at: now,
            updated_at: now,
        }
    }

    /// The catalog used by the service's reference scenarios.
    pub fn reference_catalog() -> Vec<BeerRecord> {
        vec![
            beer_record("Weissbier", -1.0, 3.0),
            beer_record("Pilsens", -2.0, 4.0),
            beer_record("Weizenbier", -4.0, 6.0),
            beer_record("Red ale", -5.0, 5.0),
            beer_record("India pale ale", -6.0, 7.0),
            beer_record("IPA", -7.0, 10.0),
            beer_record("Dunkel", -8.0, 2.0),
            beer_record("Imperial Stouts", -10.0, 13.0),
            beer_record("Brown ale", 0.0, 14.0),
        ]
    }

    /// Create a complete track entry numbered `n`.
    pub fn track_entry(n: u32) -> CatalogTrackEntry {
        CatalogTrackEntry::new(
            &format!("Track {}", n),
            &format!("Artist {}", n),
            &format!("https://open.spotify.com/artist/{}", n),
        )
    }
}
