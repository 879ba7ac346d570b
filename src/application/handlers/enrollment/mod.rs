//! Enrollment query handlers.

mod list_my_enrollments;

pub use list_my_enrollments::{EnrolledCourse, ListMyEnrollmentsHandler, ListMyEnrollmentsQuery};
