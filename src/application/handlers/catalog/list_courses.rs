//! ListCoursesHandler - Query handler for the public course catalog.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Course, CourseTrack};
use crate::ports::CourseReader;

/// Query to list courses, optionally within one track.
#[derive(Debug, Clone, Default)]
pub struct ListCoursesQuery {
    pub track: Option<CourseTrack>,
}

/// Handler for listing courses.
pub struct ListCoursesHandler {
    reader: Arc<dyn CourseReader>,
}

impl ListCoursesHandler {
    pub fn new(reader: Arc<dyn CourseReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListCoursesQuery) -> Result<Vec<Course>, CatalogError> {
        Ok(self.reader.list(query.track).await?)
    }
}
