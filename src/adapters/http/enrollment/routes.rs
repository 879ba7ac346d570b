//! Axum routes for enrollment endpoints.

use axum::{routing::get, Router};

use super::handlers::my_enrollments;
use crate::adapters::http::state::AppState;

/// Enrollment routes (require authentication).
///
/// - `GET /enrollments/my` - The learner's paid enrollments
pub fn enrollment_routes() -> Router<AppState> {
    Router::new().route("/enrollments/my", get(my_enrollments))
}
