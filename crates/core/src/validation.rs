//! Request payload validation.
//!
//! Payloads are checked as raw JSON so each problem maps to its own
//! message, then converted to the typed request.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::beer::{BeerUpdate, NewBeer};

const BEER_STYLE: &str = "beerStyle";
const MIN_TEMP: &str = "minTemp";
const MAX_TEMP: &str = "maxTemp";

/// Expected JSON type of each beer key, in check order.
const BEER_SCHEMA: [(&str, JsonKind); 3] = [
    (BEER_STYLE, JsonKind::String),
    (MIN_TEMP, JsonKind::Number),
    (MAX_TEMP, JsonKind::Number),
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum JsonKind {
    String,
    Number,
}

impl JsonKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            JsonKind::String => value.is_string(),
            JsonKind::Number => value.is_number(),
        }
    }
}

/// Payload rejected before reaching the store or the planner.
///
/// The display text is what the API returns to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Quantidade de chaves inválida")]
    KeyCount,

    #[error("Chave não encontrada: {0}")]
    MissingKey(String),

    #[error("Tipo inválido da chave: {0}")]
    InvalidType(String),

    #[error("Chave inválida: {0}")]
    UnknownKey(String),

    #[error("Dados inválidos")]
    InvalidData,

    #[error("Temperature deve ser um número")]
    TemperatureNotNumber,
}

/// Validate a beer creation payload.
///
/// The object must hold exactly `beerStyle`, `minTemp` and `maxTemp`. A key
/// set to `null` counts as missing.
pub fn validate_new_beer(payload: &Value) -> Result<NewBeer, ValidationError> {
    let object = payload.as_object().ok_or(ValidationError::KeyCount)?;
    if object.len() != BEER_SCHEMA.len() {
        return Err(ValidationError::KeyCount);
    }

    for (key, kind) in BEER_SCHEMA {
        match object.get(key) {
            None | Some(Value::Null) => return Err(ValidationError::MissingKey(key.to_string())),
            Some(value) if !kind.matches(value) => {
                return Err(ValidationError::InvalidType(key.to_string()))
            }
            Some(_) => {}
        }
    }

    Ok(NewBeer {
        beer_style: string_field(object, BEER_STYLE)?,
        min_temp: number_field(object, MIN_TEMP)?,
        max_temp: number_field(object, MAX_TEMP)?,
    })
}

/// Validate a partial beer update.
///
/// At least one key is required and every key must be a known beer key
/// with the right type.
pub fn validate_beer_update(payload: &Value) -> Result<BeerUpdate, ValidationError> {
    let object = payload.as_object().ok_or(ValidationError::KeyCount)?;
    if object.is_empty() {
        return Err(ValidationError::KeyCount);
    }

    for (key, value) in object {
        let kind = BEER_SCHEMA
            .iter()
            .find(|(name, _)| *name == key.as_str())
            .map(|(_, kind)| *kind)
            .ok_or_else(|| ValidationError::UnknownKey(key.clone()))?;
        if value.is_null() {
            return Err(ValidationError::MissingKey(key.clone()));
        }
        if !kind.matches(value) {
            return Err(ValidationError::InvalidType(key.clone()));
        }
    }

    let mut update = BeerUpdate::default();
    if object.contains_key(BEER_STYLE) {
        update.beer_style = Some(string_field(object, BEER_STYLE)?);
    }
    if object.contains_key(MIN_TEMP) {
        update.min_temp = Some(number_field(object, MIN_TEMP)?);
    }
    if object.contains_key(MAX_TEMP) {
        update.max_temp = Some(number_field(object, MAX_TEMP)?);
    }
    Ok(update)
}

/// Validate a party payload and return its temperature.
///
/// Zero and negative temperatures are valid.
pub fn validate_party(payload: &Value) -> Result<f64, ValidationError> {
    match payload.get("temperature") {
        None | Some(Value::Null) => Err(ValidationError::InvalidData),
        Some(value) => value.as_f64().ok_or(ValidationError::TemperatureNotNumber),
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Result<String, ValidationError> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::InvalidType(key.to_string()))
}

fn number_field(object: &Map<String, Value>, key: &str) -> Result<f64, ValidationError> {
    object
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| ValidationError::InvalidType(key.to_string()))
}
