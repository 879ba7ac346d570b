//! ListModulesHandler - Query handler for a course's modules with the
//! learner's progress on each.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::access::ensure_enrolled;
use crate::domain::catalog::ModuleSummary;
use crate::domain::foundation::{CourseId, UserId};
use crate::domain::progression::{ModuleProgress, ProgressionError};
use crate::ports::{CourseReader, EnrollmentChecker, ModuleReader, ProgressRepository};

/// Query to list a course's modules for a learner.
#[derive(Debug, Clone)]
pub struct ListModulesQuery {
    pub user_id: UserId,
    pub course_id: CourseId,
}

/// A module summary paired with the learner's progress on it.
///
/// Progress for modules never visited is synthesized, not stored.
#[derive(Debug, Clone)]
pub struct ModuleWithProgress {
    pub module: ModuleSummary,
    pub progress: ModuleProgress,
}

/// Handler for listing modules with progress.
pub struct ListModulesHandler {
    courses: Arc<dyn CourseReader>,
    modules: Arc<dyn ModuleReader>,
    progress: Arc<dyn ProgressRepository>,
    enrollments: Arc<dyn EnrollmentChecker>,
}

impl ListModulesHandler {
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
        query: ListModulesQuery,
    ) -> Result<Vec<ModuleWithProgress>, ProgressionError> {
        ensure_enrolled(self.enrollments.as_ref(), &query.user_id, &query.course_id).await?;

        if self.courses.find_by_id(&query.course_id).await?.is_none() {
            return Err(ProgressionError::course_not_found(query.course_id));
        }

        let modules = self.modules.list_by_course(&query.course_id).await?;
        let mut stored: HashMap<_, _> = self
            .progress
            .list_by_course(&query.user_id, &query.course_id)
            .await?
            .into_iter()
            .map(|p| (p.module_id(), p))
            .collect();

        debug!(
            course_id = %query.course_id,
            modules = modules.len(),
            records = stored.len(),
            "listing modules"
        );

        Ok(modules
            .iter()
            .map(|module| {
                let progress = stored.remove(&module.id).unwrap_or_else(|| {
                    ModuleProgress::synthesized(query.user_id.clone(), &module.position())
                });
                ModuleWithProgress {
                    module: module.summary(),
                    progress,
                }
            })
            .collect())
    }
}
