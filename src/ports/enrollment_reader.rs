//! Enrollment ports.
//!
//! `EnrollmentChecker` gates every progression operation. It follows a
//! fail-secure contract: callers treat any error as "not enrolled".

use crate::domain::enrollment::Enrollment;
use crate::domain::foundation::{CourseId, DomainError, UserId};
use async_trait::async_trait;

/// Answers whether a learner may access a course's modules.
#[async_trait]
pub trait EnrollmentChecker: Send + Sync {
    /// True if the learner holds a paid enrollment for the course.
    async fn has_paid_enrollment(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<bool, DomainError>;
}

/// Reader port for a learner's enrollments.
#[async_trait]
pub trait EnrollmentReader: Send + Sync {
    /// Paid enrollments of a learner, most recent first.
    async fn list_paid_by_user(&self, user_id: &UserId) -> Result<Vec<Enrollment>, DomainError>;
}
