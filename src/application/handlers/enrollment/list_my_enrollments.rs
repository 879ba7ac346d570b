//! ListMyEnrollmentsHandler - Query handler for a learner's paid courses.

use std::sync::Arc;

use tracing::debug;

use crate::domain::catalog::{CatalogError, Course};
use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::UserId;
use crate::ports::{CourseReader, EnrollmentReader};

/// Query for the learner's paid enrollments.
#[derive(Debug, Clone)]
pub struct ListMyEnrollmentsQuery {
    pub user_id: UserId,
}

/// A paid enrollment with the course it grants.
#[derive(Debug, Clone)]
pub struct EnrolledCourse {
    pub enrollment: Enrollment,
    pub course: Course,
}

/// Handler for listing a learner's enrollments.
pub struct ListMyEnrollmentsHandler {
    enrollments: Arc<dyn EnrollmentReader>,
    courses: Arc<dyn CourseReader>,
}

impl ListMyEnrollmentsHandler {
    pub fn new(enrollments: Arc<dyn EnrollmentReader>, courses: Arc<dyn CourseReader>) -> Self {
        Self {
            enrollments,
            courses,
        }
    }

    pub async fn handle(
        &self,
        query: ListMyEnrollmentsQuery,
    ) -> Result<Vec<EnrolledCourse>, CatalogError> {
        let enrollments = self.enrollments.list_paid_by_user(&query.user_id).await?;

        let mut enrolled = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            match self.courses.find_by_id(&enrollment.course_id).await? {
                Some(course) => enrolled.push(EnrolledCourse { enrollment, course }),
                None => debug!(course_id = %enrollment.course_id, "enrollment for removed course skipped"),
            }
        }
        Ok(enrolled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryCatalog, InMemoryEnrollmentStore};
    use crate::domain::catalog::fixtures::course;
    use crate::domain::foundation::CourseId;

    #[tokio::test]
    async fn returns_paid_enrollments_with_courses() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let store = Arc::new(InMemoryEnrollmentStore::new());
        let learner = UserId::new("learner-1").unwrap();
        let paid = course("Wellness Level 1");
        let unpaid = course("Clinical Level 1");
        store.enroll_paid(learner.clone(), paid.id).await;
        store.add(Enrollment::new(learner.clone(), unpaid.id, None)).await;
        catalog.add_course(paid).await;
        catalog.add_course(unpaid).await;

        let result = ListMyEnrollmentsHandler::new(store, catalog)
            .handle(ListMyEnrollmentsQuery { user_id: learner })
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].course.title, "Wellness Level 1");
    }

    #[tokio::test]
    async fn skips_enrollments_for_missing_courses() {
        let store = Arc::new(InMemoryEnrollmentStore::new());
        let learner = UserId::new("learner-1").unwrap();
        store.enroll_paid(learner.clone(), CourseId::new()).await;

        let result = ListMyEnrollmentsHandler::new(store, Arc::new(InMemoryCatalog::new()))
            .handle(ListMyEnrollmentsQuery { user_id: learner })
            .await
            .unwrap();

        assert!(result.is_empty());
    }
}
