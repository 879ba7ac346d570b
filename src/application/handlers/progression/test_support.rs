//! Shared wiring for progression handler tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::memory::{InMemoryCatalog, InMemoryEnrollmentStore, InMemoryProgressRepository};
use crate::domain::catalog::fixtures::{course, module};
use crate::domain::catalog::Module;
use crate::domain::foundation::{CourseId, DomainError, UserId};
use crate::ports::EnrollmentChecker;

/// A course with three five-question modules and a paid learner.
///
/// Every question's correct answer is index 1.
pub struct World {
    pub catalog: Arc<InMemoryCatalog>,
    pub enrollments: Arc<InMemoryEnrollmentStore>,
    pub progress: Arc<InMemoryProgressRepository>,
    pub course_id: CourseId,
    pub modules: Vec<Module>,
    pub learner: UserId,
}

impl World {
    pub async fn new() -> Self {
        Self::with_modules(3).await
    }

    pub async fn with_modules(count: u32) -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        let course = course("Emotional Freedom Techniques");
        let course_id = course.id;
        catalog.add_course(course).await;

        let modules: Vec<Module> = (1..=count).map(|n| module(course_id, n)).collect();
        for m in &modules {
            catalog.add_module(m.clone()).await;
        }

        let learner = UserId::new("learner-1").unwrap();
        let enrollments = Arc::new(InMemoryEnrollmentStore::new());
        enrollments.enroll_paid(learner.clone(), course_id).await;

        Self {
            catalog,
            enrollments,
            progress: Arc::new(InMemoryProgressRepository::new()),
            course_id,
            modules,
            learner,
        }
    }

    pub fn module(&self, number: u32) -> &Module {
        &self.modules[number as usize - 1]
    }

    pub fn outsider(&self) -> UserId {
        UserId::new("not-enrolled").unwrap()
    }
}

pub fn passing_answers() -> Vec<i64> {
    vec![1, 1, 1, 1, 0]
}

pub fn failing_answers() -> Vec<i64> {
    vec![1, 0, 0, 0, 0]
}

/// Checker whose backing store is unreachable.
pub struct UnavailableChecker;

#[async_trait]
impl EnrollmentChecker for UnavailableChecker {
    async fn has_paid_enrollment(
        &self,
        _user_id: &UserId,
        _course_id: &CourseId,
    ) -> Result<bool, DomainError> {
        Err(DomainError::database("connection refused"))
    }
}
