//! Response DTOs for enrollment endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::catalog::CourseResponse;
use crate::application::EnrolledCourse;

/// A paid enrollment with its course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    pub id: String,
    pub course_id: String,
    pub payment_status: String,
    pub enrolled_at: String,
    pub course: CourseResponse,
}

impl From<EnrolledCourse> for EnrollmentResponse {
    fn from(enrolled: EnrolledCourse) -> Self {
        let EnrolledCourse { enrollment, course } = enrolled;
        Self {
            id: enrollment.id.to_string(),
            course_id: enrollment.course_id.to_string(),
            payment_status: enrollment.payment_status.as_str().to_string(),
            enrolled_at: enrollment.enrolled_at.to_rfc3339(),
            course: CourseResponse::from(course),
        }
    }
}
