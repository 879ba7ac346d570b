//! Progress repository port.
//!
//! Persists one `ModuleProgress` per (learner, module).
//!
//! # Design
//!
//! - **Insert-if-absent**: first visits from concurrent requests converge on
//!   a single record
//! - **Atomic attempts**: a quiz submission's writes (attempt count, best
//!   score, completion, next-module unlock) commit together or not at all

use crate::domain::catalog::ModulePosition;
use crate::domain::foundation::{CourseId, DomainError, ModuleId, Timestamp, UserId};
use crate::domain::progression::{AttemptEffect, ModuleProgress, Score};
use async_trait::async_trait;

/// A graded submission to be recorded.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    pub user_id: UserId,
    pub module: ModulePosition,
    pub score: Score,
    pub passed: bool,
    pub attempted_at: Timestamp,
    /// Module to unlock if this attempt is the first pass. `None` for the
    /// last module of a course.
    pub next: Option<ModulePosition>,
}

/// What recording an attempt changed.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    /// The attempted module's record after the update.
    pub progress: ModuleProgress,
    pub effect: AttemptEffect,
    /// The next module's record, if this attempt unlocked it.
    pub unlocked_next: Option<ModuleProgress>,
}

/// Repository port for learner progress.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Find the learner's record for a module.
    async fn find(
        &self,
        user_id: &UserId,
        module_id: &ModuleId,
    ) -> Result<Option<ModuleProgress>, DomainError>;

    /// Find the learner's record for the module at `module_number`.
    async fn find_by_number(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        module_number: u32,
    ) -> Result<Option<ModuleProgress>, DomainError>;

    /// All of the learner's records in a course, by module_number ascending.
    async fn list_by_course(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Vec<ModuleProgress>, DomainError>;

    /// Insert `progress` unless a record for (user, module) already exists.
    ///
    /// Returns whichever record is stored afterwards.
    async fn insert_if_absent(&self, progress: &ModuleProgress)
        -> Result<ModuleProgress, DomainError>;

    /// Record a quiz attempt and, on a first pass, unlock the next module.
    ///
    /// # Errors
    ///
    /// - `ProgressNotFound` if the learner has no record for the module
    /// - `ModuleLocked` if the record is not unlocked
    /// - `DatabaseError` on persistence failure, with nothing written
    async fn apply_quiz_attempt(&self, attempt: QuizAttempt) -> Result<AttemptOutcome, DomainError>;
}
