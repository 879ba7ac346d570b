//! GetModuleHandler - Query handler for a module's full content.
//!
//! The first visit to a module persists its progress record.

use std::sync::Arc;

use tracing::{debug, warn};

use super::access::ensure_enrolled;
use crate::domain::catalog::Module;
use crate::domain::foundation::{CourseId, ModuleId, Timestamp, UserId};
use crate::domain::progression::{ModuleProgress, ProgressionError};
use crate::ports::{EnrollmentChecker, ModuleReader, ProgressRepository};

/// Query to open a module.
#[derive(Debug, Clone)]
pub struct GetModuleQuery {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub module_id: ModuleId,
}

/// Full module with the learner's progress.
#[derive(Debug, Clone)]
pub struct ModuleDetail {
    pub module: Module,
    pub progress: ModuleProgress,
}

/// Handler for opening a module.
pub struct GetModuleHandler {
    modules: Arc<dyn ModuleReader>,
    progress: Arc<dyn ProgressRepository>,
    enrollments: Arc<dyn EnrollmentChecker>,
}

impl GetModuleHandler {
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

    pub async fn handle(&self, query: GetModuleQuery) -> Result<ModuleDetail, ProgressionError> {
        ensure_enrolled(self.enrollments.as_ref(), &query.user_id, &query.course_id).await?;

        let module = self
            .modules
            .find_by_id(&query.module_id)
            .await?
            .filter(|m| m.belongs_to(&query.course_id))
            .ok_or_else(|| ProgressionError::module_not_found(query.module_id))?;

        let progress = match self.progress.find(&query.user_id, &module.id).await? {
            Some(existing) => existing,
            None => self.first_visit(&query.user_id, &module).await?,
        };

        if !progress.is_unlocked() {
            warn!(
                user_id = %query.user_id,
                module_id = %module.id,
                module_number = module.module_number,
                "locked module requested"
            );
            return Err(ProgressionError::locked(module.id, module.module_number));
        }

        Ok(ModuleDetail { module, progress })
    }

    async fn first_visit(
        &self,
        user_id: &UserId,
        module: &Module,
    ) -> Result<ModuleProgress, ProgressionError> {
        let previous = if module.is_first() {
            None
        } else {
            self.progress
                .find_by_number(user_id, &module.course_id, module.module_number - 1)
                .await?
        };

        let record =
            ModuleProgress::first_visit(user_id.clone(), &module.position(), previous.as_ref(), Timestamp::now());
        let stored = self.progress.insert_if_absent(&record).await?;

        debug!(
            module_id = %module.id,
            unlocked = stored.is_unlocked(),
            "progress record created on first visit"
        );
        Ok(stored)
    }
}
