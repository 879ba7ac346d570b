//! GetCourseProgressHandler - Query handler for a learner's course summary.

use std::sync::Arc;

use super::access::ensure_enrolled;
use crate::domain::foundation::{CourseId, UserId};
use crate::domain::progression::{CourseProgress, ProgressionError};
use crate::ports::{CourseReader, EnrollmentChecker, ModuleReader, ProgressRepository};

/// Query for a learner's progress through a course.
#[derive(Debug, Clone)]
pub struct GetCourseProgressQuery {
    pub user_id: UserId,
    pub course_id: CourseId,
}

/// Handler for aggregate course progress.
pub struct GetCourseProgressHandler {
    courses: Arc<dyn CourseReader>,
    modules: Arc<dyn ModuleReader>,
    progress: Arc<dyn ProgressRepository>,
    enrollments: Arc<dyn EnrollmentChecker>,
}

impl GetCourseProgressHandler {
    pub fn new(
        courses: Arc<dyn CourseReader>,
        modules: Arc<dyn ModuleReader>,
        progress: Arc<dyn ProgressRepository>,
        enrollments: Arc<dyn EnrollmentChecker>,
    ) -> Self {
        Self {
            courses,
            modules,
            progress,
            enrollments,
        }
    }

    pub async fn handle(
        &self,
        query: GetCourseProgressQuery,
    ) -> Result<CourseProgress, ProgressionError> {
        ensure_enrolled(self.enrollments.as_ref(), &query.user_id, &query.course_id).await?;

        if self.courses.find_by_id(&query.course_id).await?.is_none() {
            return Err(ProgressionError::course_not_found(query.course_id));
        }

        let total = self.modules.count_by_course(&query.course_id).await?;
        let records = self
            .progress
            .list_by_course(&query.user_id, &query.course_id)
            .await?;

        Ok(CourseProgress::compute(total, &records))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::application::handlers::progression::{SubmitQuizCommand, SubmitQuizHandler};
    use crate::domain::foundation::Timestamp;
    use crate::domain::progression::ModuleProgress;

    fn handler(world: &World) -> GetCourseProgressHandler {
        GetCourseProgressHandler::new(
            world.catalog.clone(),
            world.catalog.clone(),
            world.progress.clone(),
            world.enrollments.clone(),
        )
    }

    fn query(world: &World) -> GetCourseProgressQuery {
        GetCourseProgressQuery {
            user_id: world.learner.clone(),
            course_id: world.course_id,
        }
    }

    #[tokio::test]
    async fn fresh_learner_is_on_module_one() {
        let world = World::new().await;

        let progress = handler(&world).handle(query(&world)).await.unwrap();

        assert_eq!(progress.total_modules, 3);
        assert_eq!(progress.completed_modules, 0);
        assert_eq!(progress.current_module, 1);
        assert_eq!(progress.overall_progress, 0.0);
    }

    #[tokio::test]
    async fn course_without_modules_reports_zero_progress() {
        let world = World::with_modules(0).await;

        let progress = handler(&world).handle(query(&world)).await.unwrap();

        assert_eq!(progress.total_modules, 0);
        assert_eq!(progress.overall_progress, 0.0);
    }

    #[tokio::test]
    async fn passing_first_module_moves_current_forward() {
        let world = World::new().await;
        world
            .progress
            .insert_if_absent(&ModuleProgress::first_visit(
                world.learner.clone(),
                &world.module(1).position(),
                None,
                Timestamp::now(),
            ))
            .await
            .unwrap();
        SubmitQuizHandler::new(
            world.catalog.clone(),
            world.progress.clone(),
            world.enrollments.clone(),
        )
        .handle(SubmitQuizCommand {
            user_id: world.learner.clone(),
            course_id: world.course_id,
            module_id: world.module(1).id,
            answers: passing_answers(),
        })
        .await
        .unwrap();

        let progress = handler(&world).handle(query(&world)).await.unwrap();

        assert_eq!(progress.completed_modules, 1);
        assert_eq!(progress.current_module, 2);
        assert!((progress.overall_progress - 100.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn outsider_is_rejected() {
        let world = World::new().await;
        let mut q = query(&world);
        q.user_id = world.outsider();

        let result = handler(&world).handle(q).await;

        assert!(matches!(result, Err(ProgressionError::NotEnrolled(_))));
    }
}
