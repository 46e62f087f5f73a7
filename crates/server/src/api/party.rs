//! Party API handler.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use beerparty_core::{validate_party, MatchResult};
use serde_json::Value;
use tracing::{error, info};

use super::beers::json_body;
use super::{error_response, ErrorResponse};
use crate::state::AppState;

/// POST /party
///
/// Match `temperature` to a beer style and attach a playlist for it.
/// Upstream and store failures are logged and answered with one generic
/// message.
pub async fn plan_party(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MatchResult>, (StatusCode, Json<ErrorResponse>)> {
    let body = json_body(payload)?;
    let temperature = validate_party(&body)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;

    let Some(planner) = state.party() else {
        return Err(error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Playlist service not configured",
        ));
    };

    match planner.plan(temperature).await {
        Ok(result) => Ok(Json(result)),
        Err(e) if e.is_not_found() => {
            info!("Party for temperature {}: {}", temperature, e);
            Err(error_response(StatusCode::NOT_FOUND, e.to_string()))
        }
        Err(e) => {
            error!("Party for temperature {} failed: {}", temperature, e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao buscar cerveja",
            ))
        }
    }
}
