//! Progression-specific error types.

use crate::domain::foundation::{CourseId, DomainError, ErrorCode, ModuleId};

/// Errors raised by the progression engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressionError {
    /// Learner holds no paid enrollment for the course.
    NotEnrolled(CourseId),
    /// Course does not exist.
    CourseNotFound(CourseId),
    /// Module does not exist or belongs to another course.
    ModuleNotFound(ModuleId),
    /// Module is not unlocked for this learner.
    Locked {
        module_id: ModuleId,
        module_number: u32,
    },
    /// Request failed validation.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ProgressionError {
    pub fn not_enrolled(course_id: CourseId) -> Self {
        ProgressionError::NotEnrolled(course_id)
    }
    pub fn course_not_found(course_id: CourseId) -> Self {
        ProgressionError::CourseNotFound(course_id)
    }
    pub fn module_not_found(module_id: ModuleId) -> Self {
        ProgressionError::ModuleNotFound(module_id)
    }
    pub fn locked(module_id: ModuleId, module_number: u32) -> Self {
        ProgressionError::Locked {
            module_id,
            module_number,
        }
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProgressionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ProgressionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ProgressionError::NotEnrolled(_) => ErrorCode::NotEnrolled,
            ProgressionError::CourseNotFound(_) => ErrorCode::CourseNotFound,
            ProgressionError::ModuleNotFound(_) => ErrorCode::ModuleNotFound,
            ProgressionError::Locked { .. } => ErrorCode::ModuleLocked,
            ProgressionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ProgressionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ProgressionError::NotEnrolled(_) => "Not enrolled in this course".to_string(),
            ProgressionError::CourseNotFound(id) => format!("Course not found: {}", id),
            ProgressionError::ModuleNotFound(id) => format!("Module not found: {}", id),
            ProgressionError::Locked { module_number, .. } => format!(
                "Module {} is locked. Complete previous modules first.",
                module_number
            ),
            ProgressionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ProgressionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ProgressionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ProgressionError {}

impl From<DomainError> for ProgressionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => ProgressionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ProgressionError::Infrastructure(err.to_string()),
        }
    }
}
