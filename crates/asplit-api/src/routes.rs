//! API routes.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::health::{health, ready};
use crate::handlers::scan::scan_folder;
use crate::handlers::split::split_audio;
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/scan", post(scan_folder))
        .route("/split", post(split_audio));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
