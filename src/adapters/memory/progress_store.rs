//! In-Memory Progress Adapter
//!
//! Every operation holds the store's write lock for its whole
//! read-modify-write, so a quiz attempt and its cascade-unlock are applied
//! as one unit.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{CourseId, DomainError, ErrorCode, ModuleId, UserId};
use crate::domain::progression::{cascade_unlock, CascadeWrite, ModuleProgress};
use crate::ports::{AttemptOutcome, ProgressRepository, QuizAttempt};

type Key = (UserId, ModuleId);

/// In-memory progress store keyed by (learner, module).
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgressRepository {
    records: Arc<RwLock<HashMap<Key, ModuleProgress>>>,
}

impl InMemoryProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (useful for tests).
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

fn key(user_id: &UserId, module_id: &ModuleId) -> Key {
    (user_id.clone(), *module_id)
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn find(
        &self,
        user_id: &UserId,
        module_id: &ModuleId,
    ) -> Result<Option<ModuleProgress>, DomainError> {
        Ok(self.records.read().await.get(&key(user_id, module_id)).cloned())
    }

    async fn find_by_number(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
        module_number: u32,
    ) -> Result<Option<ModuleProgress>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|p| {
                p.user_id() == user_id
                    && &p.course_id() == course_id
                    && p.module_number() == module_number
            })
            .cloned())
    }

    async fn list_by_course(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Vec<ModuleProgress>, DomainError> {
        let records = self.records.read().await;
        let mut listed: Vec<ModuleProgress> = records
            .values()
            .filter(|p| p.user_id() == user_id && &p.course_id() == course_id)
            .cloned()
            .collect();
        listed.sort_by_key(|p| p.module_number());
        Ok(listed)
    }

    async fn insert_if_absent(
        &self,
        progress: &ModuleProgress,
    ) -> Result<ModuleProgress, DomainError> {
        let mut records = self.records.write().await;
        let stored = records
            .entry(key(progress.user_id(), &progress.module_id()))
            .or_insert_with(|| progress.clone());
        Ok(stored.clone())
    }

    async fn apply_quiz_attempt(&self, attempt: QuizAttempt) -> Result<AttemptOutcome, DomainError> {
        let mut records = self.records.write().await;

        let current_key = key(&attempt.user_id, &attempt.module.module_id);
        let mut progress = records.get(&current_key).cloned().ok_or_else(|| {
            DomainError::new(ErrorCode::ProgressNotFound, "No progress for module")
        })?;
        if !progress.is_unlocked() {
            return Err(DomainError::new(ErrorCode::ModuleLocked, "Module is locked"));
        }

        let effect = progress.record_attempt(attempt.score, attempt.passed, attempt.attempted_at);

        let mut unlocked_next = None;
        if effect.newly_completed {
            if let Some(next) = attempt.next.as_ref() {
                let next_key = key(&attempt.user_id, &next.module_id);
                let existing = records.get(&next_key).cloned();
                let (record, write) =
                    cascade_unlock(existing, &attempt.user_id, next, attempt.attempted_at);
                if write != CascadeWrite::Unchanged {
                    records.insert(next_key, record.clone());
                }
                unlocked_next = write.newly_unlocked(record);
            }
        }

        records.insert(current_key, progress.clone());

        Ok(AttemptOutcome {
            progress,
            effect,
            unlocked_next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::progression::fixtures::{learner, position};
    use crate::domain::progression::Score;

    fn attempt(
        module: crate::domain::catalog::ModulePosition,
        next: Option<crate::domain::catalog::ModulePosition>,
        correct: u32,
        passed: bool,
    ) -> QuizAttempt {
        QuizAttempt {
            user_id: learner(),
            module,
            score: Score::new(correct, 5),
            passed,
            attempted_at: Timestamp::now(),
            next,
        }
    }

    #[tokio::test]
    async fn insert_if_absent_keeps_first_record() {
        let repo = InMemoryProgressRepository::new();
        let pos = position(CourseId::new(), 1);
        let first = ModuleProgress::first_visit(learner(), &pos, None, Timestamp::now());
        let second = ModuleProgress::first_visit(learner(), &pos, None, Timestamp::now());

        let stored = repo.insert_if_absent(&first).await.unwrap();
        let again = repo.insert_if_absent(&second).await.unwrap();

        assert_eq!(stored.id(), first.id());
        assert_eq!(again.id(), first.id());
        assert_eq!(repo.record_count().await, 1);
    }

    #[tokio::test]
    async fn first_pass_unlocks_next_module() {
        let repo = InMemoryProgressRepository::new();
        let course = CourseId::new();
        let (m1, m2) = (position(course, 1), position(course, 2));
        repo.insert_if_absent(&ModuleProgress::first_visit(learner(), &m1, None, Timestamp::now()))
            .await
            .unwrap();

        let outcome = repo.apply_quiz_attempt(attempt(m1, Some(m2), 4, true)).await.unwrap();

        assert!(outcome.effect.newly_completed);
        let next = outcome.unlocked_next.unwrap();
        assert_eq!(next.module_id(), m2.module_id);
        assert!(repo.find(&learner(), &m2.module_id).await.unwrap().unwrap().is_unlocked());
    }

    #[tokio::test]
    async fn first_pass_does_not_report_an_already_open_next_module() {
        let repo = InMemoryProgressRepository::new();
        let course = CourseId::new();
        let (m1, m2) = (position(course, 1), position(course, 2));
        repo.insert_if_absent(&ModuleProgress::first_visit(learner(), &m1, None, Timestamp::now()))
            .await
            .unwrap();
        repo.insert_if_absent(&ModuleProgress::unlocked_by_cascade(learner(), &m2, Timestamp::now()))
            .await
            .unwrap();

        let outcome = repo.apply_quiz_attempt(attempt(m1, Some(m2), 4, true)).await.unwrap();

        assert!(outcome.effect.newly_completed);
        assert!(outcome.unlocked_next.is_none());
    }

    #[tokio::test]
    async fn repeat_pass_does_not_cascade_again() {
        let repo = InMemoryProgressRepository::new();
        let course = CourseId::new();
        let (m1, m2) = (position(course, 1), position(course, 2));
        repo.insert_if_absent(&ModuleProgress::first_visit(learner(), &m1, None, Timestamp::now()))
            .await
            .unwrap();

        repo.apply_quiz_attempt(attempt(m1, Some(m2), 4, true)).await.unwrap();
        let outcome = repo.apply_quiz_attempt(attempt(m1, Some(m2), 5, true)).await.unwrap();

        assert!(!outcome.effect.newly_completed);
        assert!(outcome.unlocked_next.is_none());
        assert_eq!(outcome.progress.quiz_attempts(), 2);
    }

    #[tokio::test]
    async fn failed_attempt_leaves_next_untouched() {
        let repo = InMemoryProgressRepository::new();
        let course = CourseId::new();
        let (m1, m2) = (position(course, 1), position(course, 2));
        repo.insert_if_absent(&ModuleProgress::first_visit(learner(), &m1, None, Timestamp::now()))
            .await
            .unwrap();

        let outcome = repo.apply_quiz_attempt(attempt(m1, Some(m2), 1, false)).await.unwrap();

        assert!(outcome.unlocked_next.is_none());
        assert!(repo.find(&learner(), &m2.module_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn attempt_without_record_is_rejected() {
        let repo = InMemoryProgressRepository::new();
        let m1 = position(CourseId::new(), 1);

        let err = repo.apply_quiz_attempt(attempt(m1, None, 5, true)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ProgressNotFound);
        assert_eq!(repo.record_count().await, 0);
    }

    #[tokio::test]
    async fn attempt_on_locked_record_is_rejected() {
        let repo = InMemoryProgressRepository::new();
        let m2 = position(CourseId::new(), 2);
        repo.insert_if_absent(&ModuleProgress::first_visit(learner(), &m2, None, Timestamp::now()))
            .await
            .unwrap();

        let err = repo.apply_quiz_attempt(attempt(m2, None, 5, true)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ModuleLocked);
        let stored = repo.find(&learner(), &m2.module_id).await.unwrap().unwrap();
        assert_eq!(stored.quiz_attempts(), 0);
    }

    #[tokio::test]
    async fn concurrent_first_passes_cascade_once() {
        let repo = InMemoryProgressRepository::new();
        let course = CourseId::new();
        let (m1, m2) = (position(course, 1), position(course, 2));
        repo.insert_if_absent(&ModuleProgress::first_visit(learner(), &m1, None, Timestamp::now()))
            .await
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.apply_quiz_attempt(attempt(m1, Some(m2), 5, true)).await })
            })
            .collect();
        let mut completions = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().effect.newly_completed {
                completions += 1;
            }
        }

        assert_eq!(completions, 1);
        let stored = repo.find(&learner(), &m1.module_id).await.unwrap().unwrap();
        assert_eq!(stored.quiz_attempts(), 8);
        assert_eq!(repo.record_count().await, 2);
    }
}
