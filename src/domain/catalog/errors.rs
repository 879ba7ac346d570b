//! Catalog-specific error types.

use crate::domain::foundation::{CourseId, DomainError, ErrorCode};

/// Errors raised by catalog reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Course does not exist.
    CourseNotFound(CourseId),
    /// Query parameters were invalid.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl CatalogError {
    pub fn course_not_found(id: CourseId) -> Self {
        CatalogError::CourseNotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CatalogError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::CourseNotFound(_) => ErrorCode::CourseNotFound,
            CatalogError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CatalogError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            CatalogError::CourseNotFound(id) => format!("Course not found: {}", id),
            CatalogError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CatalogError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CatalogError {}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => CatalogError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => CatalogError::Infrastructure(err.to_string()),
        }
    }
}
