//! HTTP adapter for module progression and quiz grading.
//!
//! - `GET /api/courses/:course_id/modules`
//! - `GET /api/courses/:course_id/modules/:module_id`
//! - `GET /api/courses/:course_id/modules/:module_id/quiz`
//! - `POST /api/courses/:course_id/modules/:module_id/submit-quiz`
//! - `GET /api/courses/:course_id/progress`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::ProgressionApiError;
pub use routes::progression_routes;
