//! HTTP handlers for catalog endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{CourseResponse, ListCoursesParams};
use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::http::state::AppState;
use crate::application::{GetCourseQuery, ListCoursesQuery};
use crate::domain::catalog::{CatalogError, CourseTrack};
use crate::domain::foundation::CourseId;

/// GET /api/courses - List courses, optionally filtered by track
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<ListCoursesParams>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let track = params
        .track
        .as_deref()
        .map(str::parse::<CourseTrack>)
        .transpose()
        .map_err(|e| CatalogError::validation("track", e.to_string()))?;

    let courses = state
        .list_courses_handler()
        .handle(ListCoursesQuery { track })
        .await?;

    let response: Vec<CourseResponse> = courses.into_iter().map(CourseResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/courses/:course_id - Get one course
pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<CourseId>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let course = state
        .get_course_handler()
        .handle(GetCourseQuery { course_id })
        .await?;

    Ok(Json(CourseResponse::from(course)))
}

/// API error type that converts catalog errors to HTTP responses.
#[derive(Debug)]
pub struct CatalogApiError(CatalogError);

impl From<CatalogError> for CatalogApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CatalogApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            CatalogError::CourseNotFound(_) => (StatusCode::NOT_FOUND, "COURSE_NOT_FOUND"),
            CatalogError::ValidationFailed { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            CatalogError::Infrastructure(msg) => {
                tracing::error!(error = %msg, "catalog request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse::new(error_code, self.0.message());
        (status, Json(body)).into_response()
    }
}
