//! Top-level router assembly.

use axum::{middleware, routing::get, Json, Router};

use super::catalog::catalog_routes;
use super::dto::HealthResponse;
use super::enrollment::enrollment_routes;
use super::middleware::{auth_middleware, AuthState};
use super::progression::progression_routes;
use super::state::AppState;

/// GET /api/health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Builds the full `/api` router with auth middleware applied.
///
/// Transport layers (tracing, CORS, timeouts) are added by the caller.
pub fn api_router(state: AppState, validator: AuthState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .merge(catalog_routes())
        .merge(enrollment_routes())
        .merge(progression_routes())
        .layer(middleware::from_fn_with_state(validator, auth_middleware))
        .with_state(state);

    Router::new().nest("/api", api)
}
