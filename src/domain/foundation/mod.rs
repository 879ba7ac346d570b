//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the TTI Academy domain.

mod auth;
mod errors;
mod fraction;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use fraction::Fraction;
pub use ids::{CourseId, EnrollmentId, ModuleId, ProgressId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
