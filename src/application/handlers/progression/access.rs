//! Paid-enrollment gate shared by every progression handler.

use tracing::{error, warn};

use crate::domain::foundation::{CourseId, UserId};
use crate::domain::progression::ProgressionError;
use crate::ports::EnrollmentChecker;

/// Fails with `NotEnrolled` unless the learner holds a paid enrollment.
///
/// Checker errors deny access.
pub(crate) async fn ensure_enrolled(
    checker: &dyn EnrollmentChecker,
    user_id: &UserId,
    course_id: &CourseId,
) -> Result<(), ProgressionError> {
    match checker.has_paid_enrollment(user_id, course_id).await {
        Ok(true) => Ok(()),
        Ok(false) => {
            warn!(user_id = %user_id, course_id = %course_id, "access without paid enrollment");
            Err(ProgressionError::not_enrolled(*course_id))
        }
        Err(err) => {
            error!(error = %err, course_id = %course_id, "enrollment check failed");
            Err(ProgressionError::not_enrolled(*course_id))
        }
    }
}
