//! PostgreSQL implementation of ProgressRepository.
//!
//! A quiz attempt runs in one transaction: the attempted module's row is
//! locked with `SELECT ... FOR UPDATE` and updated; on a first pass the next
//! module's row is locked too, then inserted or unlocked unless it was
//! already open.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{
    CourseId, DomainError, ErrorCode, ModuleId, ProgressId, Timestamp, UserId,
};
use crate::domain::progression::{cascade_unlock, CascadeWrite, ModuleProgress, Score};
use crate::ports::{AttemptOutcome, ProgressRepository, QuizAttempt};

/// PostgreSQL progress repository.
pub struct PostgresProgressRepository {
    pool: PgPool,
}

impl PostgresProgressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProgressRow {
    id: Uuid,
    user_id: String,
    course_id: Uuid,
    module_id: Uuid,
    module_number: i32,
    is_unlocked: bool,
    is_completed: bool,
    quiz_attempts: i32,
    best_score_correct: i32,
    best_score_total: i32,
    last_attempt_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn non_negative(field: &str, value: i32) -> Result<u32, DomainError> {
    u32::try_from(value)
        .map_err(|_| DomainError::database(format!("Invalid {} value: {}", field, value)))
}

impl TryFrom<ProgressRow> for ModuleProgress {
    type Error = DomainError;

    fn try_from(row: ProgressRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id)
            .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?;
        Ok(ModuleProgress::reconstitute(
            ProgressId::from_uuid(row.id),
            user_id,
            CourseId::from_uuid(row.course_id),
            ModuleId::from_uuid(row.module_id),
            non_negative("module_number", row.module_number)?,
            row.is_unlocked,
            row.is_completed,
            non_negative("quiz_attempts", row.quiz_attempts)?,
            Score::new(
                non_negative("best_score_correct", row.best_score_correct)?,
                non_negative("best_score_total", row.best_score_total)?,
            ),
            row.last_attempt_at.map(Timestamp::from_datetime),
            row.completed_at.map(Timestamp::from_datetime),
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

const PROGRESS_COLUMNS: &str = r#"
    id, user_id, course_id, module_id, module_number, is_unlocked, is_completed,
    quiz_attempts, best_score_correct, best_score_total, last_attempt_at,
    completed_at, created_at, updated_at
"#;

async fn insert_or_unlock(
    tx: &mut Transaction<'_, Postgres>,
    progress: &ModuleProgress,
) -> Result<ModuleProgress, DomainError> {
    let row: ProgressRow = sqlx::query_as(&format!(
        r#"
        INSERT INTO module_progress (
            id, user_id, course_id, module_id, module_number, is_unlocked, is_completed,
            quiz_attempts, best_score_correct, best_score_total, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, TRUE, FALSE, 0, 0, 0, $6, $6)
        ON CONFLICT (user_id, module_id) DO UPDATE SET
            is_unlocked = TRUE,
            updated_at = EXCLUDED.updated_at
        RETURNING {}
        "#,
        PROGRESS_COLUMNS
    ))
    .bind(progress.id().as_uuid())
    .bind(progress.user_id().as_str())
    .bind(progress.course_id().as_uuid())
    .bind(progress.module_id().as_uuid())
    .bind(progress.module_number() as i32)
    .bind(progress.updated_at().as_datetime())
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| DomainError::database(format!("Failed to unlock next module: {}", e)))?;

    ModuleProgress::try_from(row)
}

async fn lock_progress(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &UserId,
    module_id: &ModuleId,
) -> Result<Option<ModuleProgress>, DomainError> {
    let row: Option<ProgressRow> = sqlx::query_as(&format!(
        "SELECT {} FROM module_progress WHERE user_id = $1 AND module_id = $2 FOR UPDATE",
        PROGRESS_COLUMNS
    ))
    .bind(user_id.as_str())
    .bind(module_id.as_uuid())
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| DomainError::database(format!("Failed to lock progress: {}", e)))?;

    row.map(ModuleProgress::try_from).transpose()
}

async fn mark_unlocked(
    tx: &mut Transaction<'_, Postgres>,
    progress: &ModuleProgress,
) -> Result<(), DomainError> {
    sqlx::query("UPDATE module_progress SET is_unlocked = TRUE, updated_at = $2 WHERE id = $1")
        .bind(progress.id().as_uuid())
        .bind(progress.updated_at().as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to unlock next module: {}", e)))?;
    Ok(())
}

#[async_trait]
impl ProgressRepository for PostgresProgressRepository {
    async fn find(
        &self,
        user_id: &UserId,
        module_id: &ModuleId,
    ) -> Result<Option<ModuleProgress>, DomainError> {
        let row: Option<ProgressRow> = sqlx::query_as(&format!(
            "SELECT {} FROM module_progress WHERE user_id = $1 AND module_id = $2",
            PROGRESS_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(module_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch progress: {}", e)))?;

        row.map(ModuleProgress::try_from).transpose()
    }

    async fn find_by_number(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        module_number: u32,
    ) -> Result<Option<ModuleProgress>, DomainError> {
        let row: Option<ProgressRow> = sqlx::query_as(&format!(
            "SELECT {} FROM module_progress WHERE user_id = $1 AND course_id = $2 AND module_number = $3",
            PROGRESS_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(course_id.as_uuid())
        .bind(module_number as i32)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch progress: {}", e)))?;

        row.map(ModuleProgress::try_from).transpose()
    }

    async fn list_by_course(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Vec<ModuleProgress>, DomainError> {
        let rows: Vec<ProgressRow> = sqlx::query_as(&format!(
            "SELECT {} FROM module_progress WHERE user_id = $1 AND course_id = $2 ORDER BY module_number ASC",
            PROGRESS_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(course_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list progress: {}", e)))?;

        rows.into_iter().map(ModuleProgress::try_from).collect()
    }

    async fn insert_if_absent(
        &self,
        progress: &ModuleProgress,
    ) -> Result<ModuleProgress, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO module_progress (
                id, user_id, course_id, module_id, module_number, is_unlocked, is_completed,
                quiz_attempts, best_score_correct, best_score_total, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, FALSE, 0, 0, 0, $7, $7)
            ON CONFLICT (user_id, module_id) DO NOTHING
            "#,
        )
        .bind(progress.id().as_uuid())
        .bind(progress.user_id().as_str())
        .bind(progress.course_id().as_uuid())
        .bind(progress.module_id().as_uuid())
        .bind(progress.module_number() as i32)
        .bind(progress.is_unlocked())
        .bind(progress.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert progress: {}", e)))?;

        // Re-read so racing first visits all see the winning row.
        self.find(progress.user_id(), &progress.module_id())
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ProgressNotFound, "Progress vanished after insert")
            })
    }

    async fn apply_quiz_attempt(&self, attempt: QuizAttempt) -> Result<AttemptOutcome, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::database(format!("Failed to begin transaction: {}", e))
        })?;

        let mut progress = lock_progress(&mut tx, &attempt.user_id, &attempt.module.module_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::ProgressNotFound, "No progress for module"))?;
        if !progress.is_unlocked() {
            return Err(DomainError::new(ErrorCode::ModuleLocked, "Module is locked"));
        }

        let effect = progress.record_attempt(attempt.score, attempt.passed, attempt.attempted_at);

        sqlx::query(
            r#"
            UPDATE module_progress SET
                is_completed = $2,
                quiz_attempts = $3,
                best_score_correct = $4,
                best_score_total = $5,
                last_attempt_at = $6,
                completed_at = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(progress.id().as_uuid())
        .bind(progress.is_completed())
        .bind(progress.quiz_attempts() as i32)
        .bind(progress.best_score().correct() as i32)
        .bind(progress.best_score().total() as i32)
        .bind(progress.last_attempt_at().map(|t| *t.as_datetime()))
        .bind(progress.completed_at().map(|t| *t.as_datetime()))
        .bind(progress.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update progress: {}", e)))?;

        let mut unlocked_next = None;
        if effect.newly_completed {
            if let Some(next) = attempt.next.as_ref() {
                let existing = lock_progress(&mut tx, &attempt.user_id, &next.module_id).await?;
                let (record, write) =
                    cascade_unlock(existing, &attempt.user_id, next, attempt.attempted_at);
                let record = match write {
                    // A first visit may insert the row after the lock read; the upsert absorbs it.
                    CascadeWrite::Insert => insert_or_unlock(&mut tx, &record).await?,
                    CascadeWrite::Update => {
                        mark_unlocked(&mut tx, &record).await?;
                        record
                    }
                    CascadeWrite::Unchanged => record,
                };
                unlocked_next = write.newly_unlocked(record);
            }
        }

        tx.commit().await.map_err(|e| {
            DomainError::database(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(AttemptOutcome {
            progress,
            effect,
            unlocked_next,
        })
    }
}
