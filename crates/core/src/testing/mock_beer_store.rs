//! Mock beer store for testing.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use uuid::Uuid;

use crate::beer::{BeerError, BeerRecord, BeerStore, BeerUpdate, NewBeer};
use crate::matcher::filter_candidates;

/// In-memory implementation of the BeerStore trait.
///
/// `find_by_temperature` filters the stored records unless a fixed result
/// was set with [`MockBeerStore::set_find_results`], which lets tests hand
/// the coordinator records outside the requested range.
#[derive(Debug, Default)]
pub struct MockBeerStore {
    beers: Mutex<Vec<BeerRecord>>,
    find_results: Mutex<Option<Vec<BeerRecord>>>,
    find_calls: Mutex<Vec<f64>>,
    /// If set, the next operation will fail with this error.
    next_error: Mutex<Option<BeerError>>,
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockBeerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_beers(beers: Vec<BeerRecord>) -> Self {
        let store = Self::new();
        *locked(&store.beers) = beers;
        store
    }

    pub fn add_beer(&self, beer: BeerRecord) {
        locked(&self.beers).push(beer);
    }

    /// Return exactly `records` from `find_by_temperature`.
    pub fn set_find_results(&self, records: Vec<BeerRecord>) {
        *locked(&self.find_results) = Some(records);
    }

    /// Make the next operation fail.
    pub fn set_next_error(&self, error: BeerError) {
        *locked(&self.next_error) = Some(error);
    }

    /// Temperatures passed to `find_by_temperature`, in call order.
    pub fn find_calls(&self) -> Vec<f64> {
        locked(&self.find_calls).clone()
    }

    fn check_error(&self) -> Result<(), BeerError> {
        match locked(&self.next_error).take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl BeerStore for MockBeerStore {
    fn find_by_temperature(&self, temperature: f64) -> Result<Vec<BeerRecord>, BeerError> {
        locked(&self.find_calls).push(temperature);
        self.check_error()?;

        if let Some(records) = locked(&self.find_results).clone() {
            return Ok(records);
        }
        Ok(filter_candidates(&locked(&self.beers), temperature))
    }

    fn list(&self) -> Result<Vec<BeerRecord>, BeerError> {
        self.check_error()?;
        let mut beers = locked(&self.beers).clone();
        beers.sort_by(|a, b| a.beer_style.cmp(&b.beer_style));
        Ok(beers)
    }

    fn count(&self) -> Result<u64, BeerError> {
        self.check_error()?;
        Ok(locked(&self.beers).len() as u64)
    }

    fn get(&self, id: &str) -> Result<BeerRecord, BeerError> {
        self.check_error()?;
        locked(&self.beers)
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| BeerError::NotFound(id.to_string()))
    }

    fn insert(&self, beer: &NewBeer) -> Result<BeerRecord, BeerError> {
        self.check_error()?;
        let mut beers = locked(&self.beers);
        if beers.iter().any(|b| b.beer_style == beer.beer_style) {
            return Err(BeerError::Duplicate(beer.beer_style.clone()));
        }

        let now = Utc::now();
        let record = BeerRecord {
            id: Uuid::new_v4().to_string(),
            beer_style: beer.beer_style.clone(),
            min_temp: beer.min_temp,
            max_temp: beer.max_temp,
            created_at: now,
            updated_at: now,
        };
        beers.push(record.clone());
        Ok(record)
    }

    fn update(&self, id: &str, update: &BeerUpdate) -> Result<BeerRecord, BeerError> {
        self.check_error()?;
        let mut beers = locked(&self.beers);

        if let Some(style) = &update.beer_style {
            if beers.iter().any(|b| b.id != id && &b.beer_style == style) {
                return Err(BeerError::Duplicate(style.clone()));
            }
        }

        let record = beers
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| BeerError::NotFound(id.to_string()))?;
        if let Some(style) = &update.beer_style {
            record.beer_style = style.clone();
        }
        if let Some(min_temp) = update.min_temp {
            record.min_temp = min_temp;
        }
        if let Some(max_temp) = update.max_temp {
            record.max_temp = max_temp;
        }
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    fn delete(&self, id: &str) -> Result<BeerRecord, BeerError> {
        self.check_error()?;
        let mut beers = locked(&self.beers);
        let index = beers
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BeerError::NotFound(id.to_string()))?;
        Ok(beers.remove(index))
    }
}
