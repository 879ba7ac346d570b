//! In-Memory Enrollment Adapter

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::{CourseId, DomainError, EnrollmentId, UserId};
use crate::ports::{EnrollmentChecker, EnrollmentReader};

/// In-memory enrollment store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEnrollmentStore {
    enrollments: Arc<RwLock<HashMap<EnrollmentId, Enrollment>>>,
}

impl InMemoryEnrollmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, enrollment: Enrollment) {
        self.enrollments.write().await.insert(enrollment.id, enrollment);
    }

    /// Convenience for tests and seeding: record a settled enrollment.
    pub async fn enroll_paid(&self, user_id: UserId, course_id: CourseId) -> EnrollmentId {
        let enrollment = Enrollment::paid(user_id, course_id);
        let id = enrollment.id;
        self.add(enrollment).await;
        id
    }
}

#[async_trait]
impl EnrollmentChecker for InMemoryEnrollmentStore {
    async fn has_paid_enrollment(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<bool, DomainError> {
        let enrollments = self.enrollments.read().await;
        Ok(enrollments
            .values()
            .any(|e| &e.user_id == user_id && &e.course_id == course_id && e.grants_access()))
    }
}

#[async_trait]
impl EnrollmentReader for InMemoryEnrollmentStore {
    async fn list_paid_by_user(&self, user_id: &UserId) -> Result<Vec<Enrollment>, DomainError> {
        let enrollments = self.enrollments.read().await;
        let mut paid: Vec<Enrollment> = enrollments
            .values()
            .filter(|e| &e.user_id == user_id && e.grants_access())
            .cloned()
            .collect();
        paid.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));
        Ok(paid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learner() -> UserId {
        UserId::new("learner-1").unwrap()
    }

    #[tokio::test]
    async fn unpaid_enrollment_does_not_grant_access() {
        let store = InMemoryEnrollmentStore::new();
        let course = CourseId::new();
        store.add(Enrollment::new(learner(), course, Some("cs_1".into()))).await;

        assert!(!store.has_paid_enrollment(&learner(), &course).await.unwrap());
        assert!(store.list_paid_by_user(&learner()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn paid_enrollment_is_scoped_to_learner_and_course() {
        let store = InMemoryEnrollmentStore::new();
        let course = CourseId::new();
        store.enroll_paid(learner(), course).await;

        assert!(store.has_paid_enrollment(&learner(), &course).await.unwrap());
        assert!(!store
            .has_paid_enrollment(&learner(), &CourseId::new())
            .await
            .unwrap());
        let other = UserId::new("learner-2").unwrap();
        assert!(!store.has_paid_enrollment(&other, &course).await.unwrap());
    }
}
