//! Route definitions for Route Safety Commander

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/routes", route_routes())
}

/// Route listing and per-route trip planning
fn route_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_routes))
        .route("/:route_id/dates", get(handlers::get_available_dates))
        .route("/:route_id/verdict", get(handlers::get_verdict))
        .route("/:route_id/hours", get(handlers::get_hourly_breakdown))
}
