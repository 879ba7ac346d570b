//! Progression domain module.
//!
//! Tracks each learner's movement through a course's modules and grades
//! the quizzes that gate it.
//!
//! # Module Structure
//!
//! - `status` - ModuleStatus state machine
//! - `progress` - ModuleProgress record and attempt rules
//! - `cascade` - unlocking the next module after a first pass
//! - `grading` - exact quiz scoring
//! - `course_progress` - aggregate course summary

mod cascade;
mod course_progress;
mod errors;
mod grading;
mod progress;
mod status;

pub use cascade::{cascade_unlock, CascadeWrite};
pub use course_progress::CourseProgress;
pub use errors::ProgressionError;
pub use grading::{grade, QuestionReview, QuizGrade, Score, NO_ANSWER};
pub use progress::{AttemptEffect, ModuleProgress};
pub use status::ModuleStatus;

#[cfg(test)]
pub(crate) mod fixtures {
    pub use super::progress::fixtures::*;
}
