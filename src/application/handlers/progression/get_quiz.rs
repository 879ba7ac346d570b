//! GetQuizHandler - Query handler for a module's quiz without the answer key.

use std::sync::Arc;

use tracing::warn;

use super::access::ensure_enrolled;
use crate::domain::catalog::PublicQuestion;
use crate::domain::foundation::{CourseId, Fraction, ModuleId, UserId};
use crate::domain::progression::{ProgressionError, Score};
use crate::ports::{EnrollmentChecker, ModuleReader, ProgressRepository};

/// Query to fetch a module's quiz.
#[derive(Debug, Clone)]
pub struct GetQuizQuery {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub module_id: ModuleId,
}

/// Quiz as served to the learner.
#[derive(Debug, Clone)]
pub struct QuizView {
    pub module_id: ModuleId,
    pub module_number: u32,
    pub module_title: String,
    pub questions: Vec<PublicQuestion>,
    pub passing_score: Fraction,
    pub attempts: u32,
    pub best_score: Score,
}

/// Handler for fetching a quiz.
///
/// Requires an existing, unlocked progress record. Unlike opening the
/// module, it never creates one.
pub struct GetQuizHandler {
    modules: Arc<dyn ModuleReader>,
    progress: Arc<dyn ProgressRepository>,
    enrollments: Arc<dyn EnrollmentChecker>,
}

impl GetQuizHandler {
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

    pub async fn handle(&self, query: GetQuizQuery) -> Result<QuizView, ProgressionError> {
        ensure_enrolled(self.enrollments.as_ref(), &query.user_id, &query.course_id).await?;

        let module = self
            .modules
            .find_by_id(&query.module_id)
            .await?
            .filter(|m| m.belongs_to(&query.course_id))
            .ok_or_else(|| ProgressionError::module_not_found(query.module_id))?;

        let progress = self
            .progress
            .find(&query.user_id, &module.id)
            .await?
            .filter(|p| p.is_unlocked())
            .ok_or_else(|| {
                warn!(module_id = %module.id, "quiz requested for locked module");
                ProgressionError::locked(module.id, module.module_number)
            })?;

        Ok(QuizView {
            module_id: module.id,
            module_number: module.module_number,
            questions: module.assessment.public_questions(),
            passing_score: module.assessment.passing_score(),
            attempts: progress.quiz_attempts(),
            best_score: progress.best_score(),
            module_title: module.title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::progression::ModuleProgress;

    fn handler(world: &World) -> GetQuizHandler {
        GetQuizHandler::new(
            world.catalog.clone(),
            world.progress.clone(),
            world.enrollments.clone(),
        )
    }

    fn query(world: &World, number: u32) -> GetQuizQuery {
        GetQuizQuery {
            user_id: world.learner.clone(),
            course_id: world.course_id,
            module_id: world.module(number).id,
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

    #[tokio::test]
    async fn quiz_without_progress_record_is_locked() {
        let world = World::new().await;

        let result = handler(&world).handle(query(&world, 1)).await;

        assert!(matches!(result, Err(ProgressionError::Locked { .. })));
        assert_eq!(world.progress.record_count().await, 0);
    }

    #[tokio::test]
    async fn quiz_for_locked_record_is_locked() {
        let world = World::new().await;
        visit(&world, 2).await;

        let result = handler(&world).handle(query(&world, 2)).await;

        assert!(matches!(
            result,
            Err(ProgressionError::Locked { module_number: 2, .. })
        ));
    }

    #[tokio::test]
    async fn unlocked_quiz_hides_answer_key() {
        let world = World::new().await;
        visit(&world, 1).await;

        let quiz = handler(&world).handle(query(&world, 1)).await.unwrap();

        assert_eq!(quiz.questions.len(), 5);
        assert_eq!(quiz.passing_score, Fraction::percent(80));
        assert_eq!(quiz.attempts, 0);
        assert_eq!(quiz.best_score, Score::zero());
    }
}
