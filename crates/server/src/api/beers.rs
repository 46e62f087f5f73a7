//! Beer catalog API handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use beerparty_core::{validate_beer_update, validate_new_beer, BeerError, BeerRecord};
use serde_json::Value;
use tracing::{error, info};

use super::{error_response, ErrorResponse};
use crate::state::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

const NOT_FOUND: &str = "Cerveja não encontrada";

/// Unwrap a JSON body, answering 400 when it doesn't parse.
pub(crate) fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| error_response(StatusCode::BAD_REQUEST, rejection.body_text()))
}

/// GET /beer
///
/// List every beer, ordered by style.
pub async fn list_beers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BeerRecord>>, ApiError> {
    state.store().list().map(Json).map_err(|e| {
        error!("Failed to list beers: {}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Erro ao buscar cervejas")
    })
}

/// GET /beer/{id}
pub async fn get_beer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BeerRecord>, ApiError> {
    match state.store().get(&id) {
        Ok(beer) => Ok(Json(beer)),
        Err(BeerError::NotFound(_)) => Err(error_response(StatusCode::NOT_FOUND, NOT_FOUND)),
        Err(e) => {
            error!("Failed to get beer {}: {}", id, e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao buscar cerveja",
            ))
        }
    }
}

/// POST /beer
///
/// Create a beer. The body must hold exactly `beerStyle`, `minTemp` and
/// `maxTemp`.
pub async fn create_beer(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_body(payload)?;
    let beer = validate_new_beer(&body)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;

    match state.store().insert(&beer) {
        Ok(record) => {
            info!("Created beer '{}' ({})", record.beer_style, record.id);
            Ok((StatusCode::CREATED, Json(record)))
        }
        Err(e) => {
            error!("Failed to create beer '{}': {}", beer.beer_style, e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao criar cerveja",
            ))
        }
    }
}

/// PUT /beer/{id}
///
/// Apply a partial update and return the updated record.
pub async fn update_beer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BeerRecord>, ApiError> {
    let body = json_body(payload)?;
    let update = validate_beer_update(&body)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;

    match state.store().update(&id, &update) {
        Ok(record) => {
            info!("Updated beer {}", id);
            Ok(Json(record))
        }
        Err(BeerError::NotFound(_)) => Err(error_response(StatusCode::NOT_FOUND, NOT_FOUND)),
        Err(e) => {
            error!("Failed to update beer {}: {}", id, e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao atualizar cerveja",
            ))
        }
    }
}

/// DELETE /beer/{id}
pub async fn delete_beer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.store().delete(&id) {
        Ok(record) => {
            info!("Deleted beer '{}' ({})", record.beer_style, id);
            Ok(StatusCode::NO_CONTENT)
        }
        Err(BeerError::NotFound(_)) => Err(error_response(StatusCode::NOT_FOUND, NOT_FOUND)),
        Err(e) => {
            error!("Failed to delete beer {}: {}", id, e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao excluir cerveja",
            ))
        }
    }
}
