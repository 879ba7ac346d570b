//! Course reader port.
//!
//! The catalog is seeded out of band; the application only reads it.

use crate::domain::catalog::{Course, CourseTrack};
use crate::domain::foundation::{CourseId, DomainError};
use async_trait::async_trait;

/// Reader port for the course catalog.
#[async_trait]
pub trait CourseReader: Send + Sync {
    /// Find a course by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError>;

    /// List courses, optionally restricted to one track.
    ///
    /// Ordered by created_at ascending.
    async fn list(&self, track: Option<CourseTrack>) -> Result<Vec<Course>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn CourseReader) {}
    }
}
