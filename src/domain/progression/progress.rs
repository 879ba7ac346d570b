//! Per-learner, per-module progress record.

use super::{ModuleStatus, Score};
use crate::domain::catalog::ModulePosition;
use crate::domain::foundation::{CourseId, ModuleId, ProgressId, Timestamp, UserId};

/// Progress of one learner through one module.
///
/// Absence of a record means "never visited": the module is unlocked only if
/// it is the first in its course. Flags move false to true only, `best_score`
/// never decreases, and `completed_at` is written once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleProgress {
    pub(crate) id: ProgressId,
    pub(crate) user_id: UserId,
    pub(crate) course_id: CourseId,
    pub(crate) module_id: ModuleId,
    pub(crate) module_number: u32,
    pub(crate) is_unlocked: bool,
    pub(crate) is_completed: bool,
    pub(crate) quiz_attempts: u32,
    pub(crate) best_score: Score,
    pub(crate) last_attempt_at: Option<Timestamp>,
    pub(crate) completed_at: Option<Timestamp>,
    pub(crate) created_at: Timestamp,
    pub(crate) updated_at: Timestamp,
}

/// What a quiz attempt changed on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptEffect {
    /// This attempt was the first pass.
    pub newly_completed: bool,
    pub best_score_improved: bool,
}

impl ModuleProgress {
    fn fresh(user_id: UserId, position: &ModulePosition, is_unlocked: bool, now: Timestamp) -> Self {
        Self {
            id: ProgressId::new(),
            user_id,
            course_id: position.course_id,
            module_id: position.module_id,
            module_number: position.module_number,
            is_unlocked,
            is_completed: false,
            quiz_attempts: 0,
            best_score: Score::zero(),
            last_attempt_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record created on a learner's first visit to a module.
    ///
    /// Module 1 is always open; module N opens only when the record for
    /// N-1 is completed.
    pub fn first_visit(
        user_id: UserId,
        position: &ModulePosition,
        previous: Option<&ModuleProgress>,
        now: Timestamp,
    ) -> Self {
        let is_unlocked = Self::initial_unlock(position.module_number, previous);
        Self::fresh(user_id, position, is_unlocked, now)
    }

    /// In-memory stand-in for a module never visited. Never persisted.
    pub fn synthesized(user_id: UserId, position: &ModulePosition) -> Self {
        Self::fresh(user_id, position, position.module_number == 1, Timestamp::now())
    }

    /// Record inserted by cascade-unlock when the previous module is passed.
    pub fn unlocked_by_cascade(user_id: UserId, position: &ModulePosition, now: Timestamp) -> Self {
        Self::fresh(user_id, position, true, now)
    }

    /// Unlock eligibility for a module with no record yet.
    pub fn initial_unlock(module_number: u32, previous: Option<&ModuleProgress>) -> bool {
        module_number == 1 || previous.map_or(false, |p| p.is_completed)
    }

    /// Rebuilds a record from storage.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ProgressId,
        user_id: UserId,
        course_id: CourseId,
        module_id: ModuleId,
        module_number: u32,
        is_unlocked: bool,
        is_completed: bool,
        quiz_attempts: u32,
        best_score: Score,
        last_attempt_at: Option<Timestamp>,
        completed_at: Option<Timestamp>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            course_id,
            module_id,
            module_number,
            is_unlocked,
            is_completed,
            quiz_attempts,
            best_score,
            last_attempt_at,
            completed_at,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> ProgressId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    pub fn module_id(&self) -> ModuleId {
        self.module_id
    }

    pub fn module_number(&self) -> u32 {
        self.module_number
    }

    pub fn is_unlocked(&self) -> bool {
        self.is_unlocked
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn quiz_attempts(&self) -> u32 {
        self.quiz_attempts
    }

    pub fn best_score(&self) -> Score {
        self.best_score
    }

    pub fn last_attempt_at(&self) -> Option<Timestamp> {
        self.last_attempt_at
    }

    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn status(&self) -> ModuleStatus {
        ModuleStatus::from_flags(self.is_unlocked, self.is_completed)
    }

    /// Opens the module. Returns true if this call changed the record.
    pub fn unlock(&mut self, now: Timestamp) -> bool {
        if self.is_unlocked {
            return false;
        }
        self.is_unlocked = true;
        self.updated_at = now;
        true
    }

    /// Applies a graded attempt.
    ///
    /// The caller checks the module is unlocked. A pass on an already
    /// completed module leaves `completed_at` untouched.
    pub fn record_attempt(&mut self, score: Score, passed: bool, now: Timestamp) -> AttemptEffect {
        self.quiz_attempts += 1;
        self.last_attempt_at = Some(now);
        self.updated_at = now;

        let best_score_improved = score > self.best_score;
        if best_score_improved {
            self.best_score = score;
        }

        let newly_completed = passed && !self.is_completed;
        if newly_completed {
            self.is_completed = true;
            self.completed_at = Some(now);
        }

        AttemptEffect {
            newly_completed,
            best_score_improved,
        }
    }
}
