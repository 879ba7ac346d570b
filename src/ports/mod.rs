//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Catalog Ports
//!
//! - `CourseReader` - Course catalog queries
//! - `ModuleReader` - Ordered module lookup per course
//!
//! ## Progression Ports
//!
//! - `ProgressRepository` - Per-learner module progress, atomic quiz attempts
//! - `EnrollmentChecker` - Paid-enrollment gate for course content
//! - `EnrollmentReader` - A learner's paid enrollments
//!
//! ## Auth Ports
//!
//! - `SessionValidator` - Bearer token validation

mod course_reader;
mod enrollment_reader;
mod module_reader;
mod progress_repository;
mod session_validator;

pub use course_reader::CourseReader;
pub use enrollment_reader::{EnrollmentChecker, EnrollmentReader};
pub use module_reader::ModuleReader;
pub use progress_repository::{AttemptOutcome, ProgressRepository, QuizAttempt};
pub use session_validator::SessionValidator;
