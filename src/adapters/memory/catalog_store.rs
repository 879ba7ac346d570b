//! In-Memory Catalog Adapter
//!
//! Holds courses and modules in memory. Used in development mode, where the
//! catalog is loaded from a YAML seed file, and in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::catalog::{Course, CourseTrack, Module};
use crate::domain::foundation::{CourseId, DomainError, ModuleId};
use crate::ports::{CourseReader, ModuleReader};

/// In-memory course and module catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    courses: Arc<RwLock<HashMap<CourseId, Course>>>,
    modules: Arc<RwLock<HashMap<ModuleId, Module>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_course(&self, course: Course) {
        self.courses.write().await.insert(course.id, course);
    }

    pub async fn add_module(&self, module: Module) {
        self.modules.write().await.insert(module.id, module);
    }

    pub async fn course_count(&self) -> usize {
        self.courses.read().await.len()
    }

    pub async fn module_count(&self) -> usize {
        self.modules.read().await.len()
    }
}

#[async_trait]
impl CourseReader for InMemoryCatalog {
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        Ok(self.courses.read().await.get(id).cloned())
    }

    async fn list(&self, track: Option<CourseTrack>) -> Result<Vec<Course>, DomainError> {
        let courses = self.courses.read().await;
        let mut listed: Vec<Course> = courses
            .values()
            .filter(|c| track.map_or(true, |t| c.track == t))
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.title.cmp(&b.title)));
        Ok(listed)
    }
}

#[async_trait]
impl ModuleReader for InMemoryCatalog {
    async fn find_by_id(&self, id: &ModuleId) -> Result<Option<Module>, DomainError> {
        Ok(self.modules.read().await.get(id).cloned())
    }

    async fn list_by_course(&self, course_id: &CourseId) -> Result<Vec<Module>, DomainError> {
        let modules = self.modules.read().await;
        let mut listed: Vec<Module> = modules
            .values()
            .filter(|m| &m.course_id == course_id)
            .cloned()
            .collect();
        listed.sort_by_key(|m| m.module_number);
        Ok(listed)
    }

    async fn find_by_number(
        &self,
        course_id: &CourseId,
        module_number: u32,
    ) -> Result<Option<Module>, DomainError> {
        let modules = self.modules.read().await;
        Ok(modules
            .values()
            .find(|m| &m.course_id == course_id && m.module_number == module_number)
            .cloned())
    }

    async fn count_by_course(&self, course_id: &CourseId) -> Result<u32, DomainError> {
        let modules = self.modules.read().await;
        Ok(modules.values().filter(|m| &m.course_id == course_id).count() as u32)
    }
}
