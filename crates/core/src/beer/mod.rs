//! Beer catalog - the styles the service knows about and the temperature
//! range each one is best served at.

mod sqlite;
mod types;

pub use sqlite::SqliteBeerStore;
pub use types::*;

/// Trait for beer record storage.
pub trait BeerStore: Send + Sync {
    /// Find every beer whose range contains `temperature`.
    ///
    /// Records come back ordered by `beer_style` ascending. Callers rely on
    /// that order to break ties deterministically.
    fn find_by_temperature(&self, temperature: f64) -> Result<Vec<BeerRecord>, BeerError>;

    /// List all beers, ordered by style.
    fn list(&self) -> Result<Vec<BeerRecord>, BeerError>;

    /// Number of beers in the catalog.
    fn count(&self) -> Result<u64, BeerError>;

    /// Get a beer by id.
    fn get(&self, id: &str) -> Result<BeerRecord, BeerError>;

    /// Insert a new beer. Fails with `Duplicate` if the style already exists.
    fn insert(&self, beer: &NewBeer) -> Result<BeerRecord, BeerError>;

    /// Apply a partial update and return the updated record.
    fn update(&self, id: &str, update: &BeerUpdate) -> Result<BeerRecord, BeerError>;

    /// Delete a beer, returning the removed record.
    fn delete(&self, id: &str) -> Result<BeerRecord, BeerError>;
}
