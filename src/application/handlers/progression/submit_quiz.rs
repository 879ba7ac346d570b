//! SubmitQuizHandler - Command handler for grading a quiz submission.
//!
//! Grades the answers, then records the attempt. A first pass completes the
//! module and unlocks the next one in the same repository call.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::access::ensure_enrolled;
use crate::domain::foundation::{CourseId, ErrorCode, ModuleId, Timestamp, UserId};
use crate::domain::progression::{grade, ModuleProgress, ProgressionError, QuestionReview, Score};
use crate::ports::{EnrollmentChecker, ModuleReader, ProgressRepository, QuizAttempt};

/// Command to submit answers for a module's quiz.
#[derive(Debug, Clone)]
pub struct SubmitQuizCommand {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub module_id: ModuleId,
    /// Chosen option index per question, in question order.
    pub answers: Vec<i64>,
}

/// Result of a graded submission.
#[derive(Debug, Clone)]
pub struct SubmitQuizResult {
    pub module_id: ModuleId,
    pub score: Score,
    pub passed: bool,
    pub reviews: Vec<QuestionReview>,
    pub progress: ModuleProgress,
    /// This submission was the learner's first pass of the module.
    pub newly_completed: bool,
    /// Next module opened by this submission, if any.
    pub unlocked_module_id: Option<ModuleId>,
}

/// Handler for quiz submissions.
pub struct SubmitQuizHandler {
    modules: Arc<dyn ModuleReader>,
    progress: Arc<dyn ProgressRepository>,
    enrollments: Arc<dyn EnrollmentChecker>,
}

impl SubmitQuizHandler {
    pub fn new(
        modules: Arc<dyn ModuleReader>,
        progress: Arc<dyn ProgressRepository>,
        enrollments: Arc<dyn EnrollmentChecker>,
    ) -> Self {
        Self {
            modules,
            progress,
            enrollments,
        }
    }

    pub async fn handle(&self, cmd: SubmitQuizCommand) -> Result<SubmitQuizResult, ProgressionError> {
        // 1. Enrollment gate
        ensure_enrolled(self.enrollments.as_ref(), &cmd.user_id, &cmd.course_id).await?;

        // 2. Module must belong to the course
        let module = self
            .modules
            .find_by_id(&cmd.module_id)
            .await?
            .filter(|m| m.belongs_to(&cmd.course_id))
            .ok_or_else(|| ProgressionError::module_not_found(cmd.module_id))?;

        // 3. Existing, unlocked record required
        let unlocked = self
            .progress
            .find(&cmd.user_id, &module.id)
            .await?
            .map_or(false, |p| p.is_unlocked());
        if !unlocked {
            warn!(module_id = %module.id, "submission for locked module");
            return Err(ProgressionError::locked(module.id, module.module_number));
        }

        // 4. Grade before any write
        let graded = grade(&module.assessment, &cmd.answers)?;
        debug!(
            module_id = %module.id,
            score = %graded.score,
            passed = graded.passed,
            "quiz graded"
        );

        // 5. Record attempt and cascade atomically
        let next = self
            .modules
            .find_by_number(&cmd.course_id, module.module_number + 1)
            .await?
            .map(|m| m.position());
        let attempt = QuizAttempt {
            user_id: cmd.user_id.clone(),
            module: module.position(),
            score: graded.score,
            passed: graded.passed,
            attempted_at: Timestamp::now(),
            next,
        };
        let outcome = self
            .progress
            .apply_quiz_attempt(attempt)
            .await
            .map_err(|err| match err.code {
                ErrorCode::ProgressNotFound | ErrorCode::ModuleLocked => {
                    ProgressionError::locked(module.id, module.module_number)
                }
                _ => err.into(),
            })?;

        if outcome.effect.newly_completed {
            info!(
                user_id = %cmd.user_id,
                module_id = %module.id,
                module_number = module.module_number,
                "module completed"
            );
        }
        let unlocked_module_id = outcome.unlocked_next.as_ref().map(|p| p.module_id());
        if let Some(next_id) = unlocked_module_id {
            info!(user_id = %cmd.user_id, module_id = %next_id, "next module unlocked");
        }

        Ok(SubmitQuizResult {
            module_id: module.id,
            score: graded.score,
            passed: graded.passed,
            reviews: graded.reviews,
            progress: outcome.progress,
            newly_completed: outcome.effect.newly_completed,
            unlocked_module_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::progression::NO_ANSWER;

    fn handler(world: &World) -> SubmitQuizHandler {
        SubmitQuizHandler::new(
            world.catalog.clone(),
            world.progress.clone(),
            world.enrollments.clone(),
        )
    }

    fn submit(world: &World, number: u32, answers: Vec<i64>) -> SubmitQuizCommand {
        SubmitQuizCommand {
            user_id: world.learner.clone(),
            course_id: world.course_id,
            module_id: world.module(number).id,
            answers,
        }
    }

    async fn visit(world: &World, number: u32) {
        let record = ModuleProgress::first_visit(
            world.learner.clone(),
            &world.module(number).position(),
            None,
            Timestamp::now(),
        );
        world.progress.insert_if_absent(&record).await.unwrap();
    }

    async fn stored(world: &World, number: u32) -> Option<ModuleProgress> {
        world
            .progress
            .find(&world.learner, &world.module(number).id)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn passing_unlocks_exactly_the_next_module() {
        let world = World::new().await;
        visit(&world, 1).await;

        let result = handler(&world)
            .handle(submit(&world, 1, passing_answers()))
            .await
            .unwrap();

        assert!(result.passed);
        assert_eq!(result.score, Score::new(4, 5));
        assert!(result.newly_completed);
        assert_eq!(result.unlocked_module_id, Some(world.module(2).id));
        assert!(stored(&world, 2).await.unwrap().is_unlocked());
        assert!(stored(&world, 3).await.is_none());
    }

    #[tokio::test]
    async fn failing_leaves_next_module_alone() {
        let world = World::new().await;
        visit(&world, 1).await;

        let result = handler(&world)
            .handle(submit(&world, 1, failing_answers()))
            .await
            .unwrap();

        assert!(!result.passed);
        assert_eq!(result.score, Score::new(1, 5));
        assert!(result.unlocked_module_id.is_none());
        assert_eq!(result.progress.quiz_attempts(), 1);
        assert!(stored(&world, 2).await.is_none());
    }

    #[tokio::test]
    async fn length_mismatch_has_no_side_effects() {
        let world = World::new().await;
        visit(&world, 1).await;

        let result = handler(&world).handle(submit(&world, 1, vec![1, 1])).await;

        assert!(matches!(result, Err(ProgressionError::ValidationFailed { .. })));
        assert_eq!(stored(&world, 1).await.unwrap().quiz_attempts(), 0);
    }

    #[tokio::test]
    async fn submission_without_record_is_locked() {
        let world = World::new().await;

        let result = handler(&world).handle(submit(&world, 1, passing_answers())).await;

        assert!(matches!(result, Err(ProgressionError::Locked { .. })));
        assert_eq!(world.progress.record_count().await, 0);
    }

    #[tokio::test]
    async fn submission_for_locked_module_is_rejected() {
        let world = World::new().await;
        visit(&world, 2).await;

        let result = handler(&world).handle(submit(&world, 2, passing_answers())).await;

        assert!(matches!(
            result,
            Err(ProgressionError::Locked { module_number: 2, .. })
        ));
    }

    #[tokio::test]
    async fn repeat_attempts_keep_completion_and_raise_best_only_when_higher() {
        let world = World::new().await;
        visit(&world, 1).await;
        let h = handler(&world);

        let first = h.handle(submit(&world, 1, passing_answers())).await.unwrap();
        let completed_at = first.progress.completed_at();

        let lower = h.handle(submit(&world, 1, failing_answers())).await.unwrap();
        assert_eq!(lower.progress.best_score(), Score::new(4, 5));
        assert!(!lower.newly_completed);

        let higher = h.handle(submit(&world, 1, vec![1, 1, 1, 1, 1])).await.unwrap();
        assert_eq!(higher.progress.best_score(), Score::new(5, 5));
        assert_eq!(higher.progress.quiz_attempts(), 3);
        assert_eq!(higher.progress.completed_at(), completed_at);
        assert!(higher.progress.is_completed());
        assert!(higher.unlocked_module_id.is_none());
    }

    #[tokio::test]
    async fn last_module_pass_has_nothing_to_unlock() {
        let world = World::with_modules(1).await;
        visit(&world, 1).await;

        let result = handler(&world)
            .handle(submit(&world, 1, passing_answers()))
            .await
            .unwrap();

        assert!(result.newly_completed);
        assert!(result.unlocked_module_id.is_none());
        assert_eq!(world.progress.record_count().await, 1);
    }

    #[tokio::test]
    async fn out_of_range_answers_are_reviewed_as_no_answer() {
        let world = World::new().await;
        visit(&world, 1).await;

        let result = handler(&world)
            .handle(submit(&world, 1, vec![1, 1, 1, 1, 42]))
            .await
            .unwrap();

        assert!(result.passed);
        assert_eq!(result.reviews[4].your_answer, NO_ANSWER);
        assert!(!result.reviews[4].is_correct);
    }

    #[tokio::test]
    async fn outsider_cannot_submit() {
        let world = World::new().await;
        visit(&world, 1).await;
        let mut cmd = submit(&world, 1, passing_answers());
        cmd.user_id = world.outsider();

        let result = handler(&world).handle(cmd).await;

        assert!(matches!(result, Err(ProgressionError::NotEnrolled(_))));
    }
}
