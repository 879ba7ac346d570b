//! Module reader port.

use crate::domain::catalog::Module;
use crate::domain::foundation::{CourseId, DomainError, ModuleId};
use async_trait::async_trait;

/// Reader port for course modules.
///
/// Modules are immutable once seeded, so implementations may cache freely.
#[async_trait]
pub trait ModuleReader: Send + Sync {
    /// Find a module by its ID, regardless of course.
    async fn find_by_id(&self, id: &ModuleId) -> Result<Option<Module>, DomainError>;

    /// All modules of a course ordered by module_number ascending.
    async fn list_by_course(&self, course_id: &CourseId) -> Result<Vec<Module>, DomainError>;

    /// Find the module at `module_number` within a course.
    async fn find_by_number(
        &self,
        course_id: &CourseId,
        module_number: u32,
    ) -> Result<Option<Module>, DomainError>;

    /// Number of modules in a course.
    async fn count_by_course(&self, course_id: &CourseId) -> Result<u32, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn ModuleReader) {}
    }
}
