//! HTTP adapter for the public course catalog.
//!
//! - `GET /api/courses` - List courses
//! - `GET /api/courses/:course_id` - Get one course

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{CourseResponse, ListCoursesParams};
pub use handlers::CatalogApiError;
pub use routes::catalog_routes;
