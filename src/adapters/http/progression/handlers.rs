//! HTTP handlers for progression endpoints.
//!
//! Every route requires an authenticated learner and a paid enrollment in
//! the course named in the path.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{
    CourseProgressResponse, ModuleDetailResponse, ModuleListItemResponse, QuizResponse,
    SubmitQuizRequest, SubmitQuizResponse,
};
use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::{
    GetCourseProgressQuery, GetModuleQuery, GetQuizQuery, ListModulesQuery, SubmitQuizCommand,
};
use crate::domain::foundation::{CourseId, ModuleId};
use crate::domain::progression::ProgressionError;

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/courses/:course_id/modules - Modules with the learner's progress
pub async fn list_modules(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(course_id): Path<CourseId>,
) -> Result<impl IntoResponse, ProgressionApiError> {
    let modules = state
        .list_modules_handler()
        .handle(ListModulesQuery {
            user_id: user.id,
            course_id,
        })
        .await?;

    let response: Vec<ModuleListItemResponse> =
        modules.into_iter().map(ModuleListItemResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/courses/:course_id/modules/:module_id - Module content
pub async fn get_module(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((course_id, module_id)): Path<(CourseId, ModuleId)>,
) -> Result<impl IntoResponse, ProgressionApiError> {
    let detail = state
        .get_module_handler()
        .handle(GetModuleQuery {
            user_id: user.id,
            course_id,
            module_id,
        })
        .await?;

    Ok(Json(ModuleDetailResponse::from(detail)))
}

/// GET /api/courses/:course_id/modules/:module_id/quiz - Quiz without answers
pub async fn get_quiz(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((course_id, module_id)): Path<(CourseId, ModuleId)>,
) -> Result<impl IntoResponse, ProgressionApiError> {
    let quiz = state
        .get_quiz_handler()
        .handle(GetQuizQuery {
            user_id: user.id,
            course_id,
            module_id,
        })
        .await?;

    Ok(Json(QuizResponse::from(quiz)))
}

/// GET /api/courses/:course_id/progress - Aggregate course progress
pub async fn get_course_progress(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(course_id): Path<CourseId>,
) -> Result<impl IntoResponse, ProgressionApiError> {
    let progress = state
        .course_progress_handler()
        .handle(GetCourseProgressQuery {
            user_id: user.id,
            course_id,
        })
        .await?;

    Ok(Json(CourseProgressResponse::new(course_id, progress)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/courses/:course_id/modules/:module_id/submit-quiz - Grade answers
pub async fn submit_quiz(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((course_id, module_id)): Path<(CourseId, ModuleId)>,
    Json(request): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, ProgressionApiError> {
    let result = state
        .submit_quiz_handler()
        .handle(SubmitQuizCommand {
            user_id: user.id,
            course_id,
            module_id,
            answers: request.answers,
        })
        .await?;

    Ok(Json(SubmitQuizResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts progression errors to HTTP responses.
#[derive(Debug)]
pub struct ProgressionApiError(ProgressionError);

impl From<ProgressionError> for ProgressionApiError {
    fn from(err: ProgressionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ProgressionApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            ProgressionError::Locked { .. } => (StatusCode::FORBIDDEN, "MODULE_LOCKED"),
            ProgressionError::NotEnrolled(_) => (StatusCode::FORBIDDEN, "NOT_ENROLLED"),
            ProgressionError::CourseNotFound(_) => (StatusCode::NOT_FOUND, "COURSE_NOT_FOUND"),
            ProgressionError::ModuleNotFound(_) => (StatusCode::NOT_FOUND, "MODULE_NOT_FOUND"),
            ProgressionError::ValidationFailed { .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
            }
            ProgressionError::Infrastructure(msg) => {
                tracing::error!(error = %msg, "progression request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = match &self.0 {
            ProgressionError::ValidationFailed { field, .. } => ErrorResponse::with_details(
                error_code,
                self.0.message(),
                serde_json::json!({ "field": field }),
            ),
            ProgressionError::Infrastructure(_) => {
                ErrorResponse::new(error_code, "Internal server error")
            }
            _ => ErrorResponse::new(error_code, self.0.message()),
        };
        (status, Json(body)).into_response()
    }
}
