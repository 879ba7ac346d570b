//! HTTP adapter for a learner's enrollments.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::EnrollmentResponse;
pub use routes::enrollment_routes;
