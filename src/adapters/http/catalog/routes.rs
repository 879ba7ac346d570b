//! Axum routes for catalog endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_course, list_courses};
use crate::adapters::http::state::AppState;

/// Public catalog routes.
///
/// - `GET /courses` - List courses (`?track=wellness|clinical`)
/// - `GET /courses/:course_id` - Get one course
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/:course_id", get(get_course))
}
