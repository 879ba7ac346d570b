//! GetCourseHandler - Query handler for a single course.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Course};
use crate::domain::foundation::CourseId;
use crate::ports::CourseReader;

/// Query to get a course by ID.
#[derive(Debug, Clone)]
pub struct GetCourseQuery {
    pub course_id: CourseId,
}

/// Handler for retrieving a course.
pub struct GetCourseHandler {
    reader: Arc<dyn CourseReader>,
}

impl GetCourseHandler {
    pub fn new(reader: Arc<dyn CourseReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetCourseQuery) -> Result<Course, CatalogError> {
        self.reader
            .find_by_id(&query.course_id)
            .await?
            .ok_or_else(|| CatalogError::course_not_found(query.course_id))
    }
}
