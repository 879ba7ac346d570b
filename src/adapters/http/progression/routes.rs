//! Axum routes for progression endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_course_progress, get_module, get_quiz, list_modules, submit_quiz};
use crate::adapters::http::state::AppState;

/// Progression routes (require authentication and a paid enrollment).
///
/// - `GET /courses/:course_id/modules` - Modules with progress
/// - `GET /courses/:course_id/modules/:module_id` - Module content
/// - `GET /courses/:course_id/modules/:module_id/quiz` - Quiz without answers
/// - `POST /courses/:course_id/modules/:module_id/submit-quiz` - Grade answers
/// - `GET /courses/:course_id/progress` - Aggregate progress
pub fn progression_routes() -> Router<AppState> {
    Router::new()
        .route("/courses/:course_id/modules", get(list_modules))
        .route("/courses/:course_id/modules/:module_id", get(get_module))
        .route("/courses/:course_id/modules/:module_id/quiz", get(get_quiz))
        .route(
            "/courses/:course_id/modules/:module_id/submit-quiz",
            post(submit_quiz),
        )
        .route("/courses/:course_id/progress", get(get_course_progress))
}
