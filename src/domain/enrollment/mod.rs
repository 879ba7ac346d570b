//! Enrollment domain module.
//!
//! A learner's purchase of a course. Only paid enrollments open the
//! course's modules.

mod aggregate;
mod status;

pub use aggregate::Enrollment;
pub use status::PaymentStatus;
