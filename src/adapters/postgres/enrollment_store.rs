//! PostgreSQL implementation of EnrollmentChecker and EnrollmentReader.
//!
//! Only `paid` enrollments grant access to course content.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::enrollment::{Enrollment, PaymentStatus};
use crate::domain::foundation::{CourseId, DomainError, EnrollmentId, Timestamp, UserId};
use crate::ports::{EnrollmentChecker, EnrollmentReader};

/// PostgreSQL enrollment store.
pub struct PostgresEnrollmentStore {
    pool: PgPool,
}

impl PostgresEnrollmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EnrollmentRow {
    id: Uuid,
    user_id: String,
    course_id: Uuid,
    payment_status: String,
    session_id: Option<String>,
    enrolled_at: DateTime<Utc>,
}

impl TryFrom<EnrollmentRow> for Enrollment {
    type Error = DomainError;

    fn try_from(row: EnrollmentRow) -> Result<Self, Self::Error> {
        let payment_status: PaymentStatus = row.payment_status.parse().map_err(|e| {
            DomainError::database(format!("Invalid payment_status value: {}", e))
        })?;
        Ok(Enrollment {
            id: EnrollmentId::from_uuid(row.id),
            user_id: UserId::new(row.user_id)
                .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?,
            course_id: CourseId::from_uuid(row.course_id),
            payment_status,
            session_id: row.session_id,
            enrolled_at: Timestamp::from_datetime(row.enrolled_at),
        })
    }
}

#[async_trait]
impl EnrollmentChecker for PostgresEnrollmentStore {
    async fn has_paid_enrollment(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM enrollments
                WHERE user_id = $1 AND course_id = $2 AND payment_status = $3
            )
            "#,
        )
        .bind(user_id.as_str())
        .bind(course_id.as_uuid())
        .bind(PaymentStatus::Paid.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to check enrollment: {}", e)))?;

        Ok(exists)
    }
}

#[async_trait]
impl EnrollmentReader for PostgresEnrollmentStore {
    async fn list_paid_by_user(&self, user_id: &UserId) -> Result<Vec<Enrollment>, DomainError> {
        let rows: Vec<EnrollmentRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, course_id, payment_status, session_id, enrolled_at
            FROM enrollments
            WHERE user_id = $1 AND payment_status = $2
            ORDER BY enrolled_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .bind(PaymentStatus::Paid.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list enrollments: {}", e)))?;

        rows.into_iter().map(Enrollment::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn row(status: &str) -> EnrollmentRow {
        EnrollmentRow {
            id: Uuid::new_v4(),
            user_id: "learner-1".to_string(),
            course_id: Uuid::new_v4(),
            payment_status: status.to_string(),
            session_id: Some("cs_test_1".to_string()),
            enrolled_at: Utc::now(),
        }
    }

    #[test]
    fn paid_row_grants_access() {
        let enrollment = Enrollment::try_from(row("paid")).unwrap();
        assert!(enrollment.grants_access());
        assert_eq!(enrollment.session_id.as_deref(), Some("cs_test_1"));
    }

    #[test]
    fn unknown_status_is_a_database_error() {
        let err = Enrollment::try_from(row("refunded")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
