//! Catalog query handlers.

mod get_course;
mod list_courses;

pub use get_course::{GetCourseHandler, GetCourseQuery};
pub use list_courses::{ListCoursesHandler, ListCoursesQuery};
