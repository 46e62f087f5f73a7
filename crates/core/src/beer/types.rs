//! Types for the beer catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored beer style with its serving temperature range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerRecord {
    /// Record id (UUID v4).
    #[serde(rename = "_id")]
    pub id: String,
    /// Style label, unique across the catalog.
    pub beer_style: String,
    /// Lowest recommended temperature (°C).
    pub min_temp: f64,
    /// Highest recommended temperature (°C).
    pub max_temp: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BeerRecord {
    /// Center of the serving range.
    pub fn midpoint(&self) -> f64 {
        (self.min_temp + self.max_temp) / 2.0
    }

    /// Absolute distance between the range midpoint and `temperature`.
    pub fn midpoint_distance(&self, temperature: f64) -> f64 {
        (self.midpoint() - temperature).abs()
    }

    /// Whether `temperature` falls inside `[min_temp, max_temp]`.
    pub fn accepts(&self, temperature: f64) -> bool {
        self.min_temp <= temperature && temperature <= self.max_temp
    }
}

/// Payload for creating a beer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBeer {
    pub beer_style: String,
    pub min_temp: f64,
    pub max_temp: f64,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beer_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_temp: Option<f64>,
}

impl BeerUpdate {
    pub fn is_empty(&self) -> bool {
        self.beer_style.is_none() && self.min_temp.is_none() && self.max_temp.is_none()
    }
}

/// Errors for beer store operations.
#[derive(Debug, Error)]
pub enum BeerError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Beer style already exists: {0}")]
    Duplicate(String),
}
