use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{beers, handlers, middleware::metrics_middleware, party};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        // Beer catalog
        .route("/beer", get(beers::list_beers).post(beers::create_beer))
        .route(
            "/beer/{id}",
            get(beers::get_beer)
                .put(beers::update_beer)
                .delete(beers::delete_beer),
        )
        // Party
        .route("/party", post(party::plan_party))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
