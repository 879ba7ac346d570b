//! Progression handlers.
//!
//! Every handler first checks the learner holds a paid enrollment for the
//! course.
//!
//! ## Commands
//! - Submitting a quiz (grading, completion, next-module unlock)
//!
//! ## Queries
//! - Listing modules with progress
//! - Opening a module (persists progress on first visit)
//! - Fetching a quiz without its answer key
//! - Aggregate course progress

mod access;
mod get_course_progress;
mod get_module;
mod get_quiz;
mod list_modules;
mod submit_quiz;

#[cfg(test)]
mod test_support;

// Commands
pub use submit_quiz::{SubmitQuizCommand, SubmitQuizHandler, SubmitQuizResult};

// Queries
pub use get_course_progress::{GetCourseProgressHandler, GetCourseProgressQuery};
pub use get_module::{GetModuleHandler, GetModuleQuery, ModuleDetail};
pub use get_quiz::{GetQuizHandler, GetQuizQuery, QuizView};
pub use list_modules::{ListModulesHandler, ListModulesQuery, ModuleWithProgress};
