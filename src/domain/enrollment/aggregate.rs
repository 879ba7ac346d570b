//! Enrollment aggregate.

use serde::{Deserialize, Serialize};

use super::PaymentStatus;
use crate::domain::foundation::{CourseId, EnrollmentId, StateMachine, Timestamp, UserId, ValidationError};

/// A learner's enrollment in a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub payment_status: PaymentStatus,
    /// Checkout session reference from the payment provider.
    pub session_id: Option<String>,
    pub enrolled_at: Timestamp,
}

impl Enrollment {
    pub fn new(user_id: UserId, course_id: CourseId, session_id: Option<String>) -> Self {
        Self {
            id: EnrollmentId::new(),
            user_id,
            course_id,
            payment_status: PaymentStatus::Initiated,
            session_id,
            enrolled_at: Timestamp::now(),
        }
    }

    /// An enrollment whose payment has already settled.
    pub fn paid(user_id: UserId, course_id: CourseId) -> Self {
        Self {
            payment_status: PaymentStatus::Paid,
            ..Self::new(user_id, course_id, None)
        }
    }

    pub fn grants_access(&self) -> bool {
        self.payment_status.grants_access()
    }

    /// Moves the payment status forward. Re-applying the current status is a no-op.
    pub fn update_payment_status(&mut self, status: PaymentStatus) -> Result<(), ValidationError> {
        if self.payment_status == status {
            return Ok(());
        }
        self.payment_status = self.payment_status.transition_to(status)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learner() -> UserId {
        UserId::new("learner-1").unwrap()
    }

    #[test]
    fn new_enrollment_starts_initiated() {
        let e = Enrollment::new(learner(), CourseId::new(), Some("cs_test_1".into()));
        assert_eq!(e.payment_status, PaymentStatus::Initiated);
        assert!(!e.grants_access());
    }

    #[test]
    fn payment_settles_once() {
        let mut e = Enrollment::new(learner(), CourseId::new(), None);
        e.update_payment_status(PaymentStatus::Paid).unwrap();
        assert!(e.grants_access());
        e.update_payment_status(PaymentStatus::Paid).unwrap();
        assert!(e.update_payment_status(PaymentStatus::Expired).is_err());
    }

    #[test]
    fn paid_constructor_grants_access() {
        assert!(Enrollment::paid(learner(), CourseId::new()).grants_access());
    }
}
