//! HTTP handlers for enrollment endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use super::dto::EnrollmentResponse;
use crate::adapters::http::catalog::CatalogApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::ListMyEnrollmentsQuery;

/// GET /api/enrollments/my - The learner's paid enrollments
pub async fn my_enrollments(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, CatalogApiError> {
    let enrolled = state
        .list_my_enrollments_handler()
        .handle(ListMyEnrollmentsQuery { user_id: user.id })
        .await?;

    let response: Vec<EnrollmentResponse> =
        enrolled.into_iter().map(EnrollmentResponse::from).collect();
    Ok(Json(response))
}
