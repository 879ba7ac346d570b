//! Shared application state for the HTTP surface.

use std::sync::Arc;

use crate::adapters::memory::{InMemoryCatalog, InMemoryEnrollmentStore, InMemoryProgressRepository};
use crate::application::{
    GetCourseHandler, GetCourseProgressHandler, GetModuleHandler, GetQuizHandler,
    ListCoursesHandler, ListModulesHandler, ListMyEnrollmentsHandler, SubmitQuizHandler,
};
use crate::ports::{
    CourseReader, EnrollmentChecker, EnrollmentReader, ModuleReader, ProgressRepository,
};

/// Port handles shared by every request.
///
/// Cloned per request; handlers are built on demand from the shared ports.
#[derive(Clone)]
pub struct AppState {
    pub courses: Arc<dyn CourseReader>,
    pub modules: Arc<dyn ModuleReader>,
    pub progress: Arc<dyn ProgressRepository>,
    pub enrollment_checker: Arc<dyn EnrollmentChecker>,
    pub enrollment_reader: Arc<dyn EnrollmentReader>,
}

impl AppState {
    /// State backed entirely by the in-memory stores.
    pub fn in_memory(
        catalog: InMemoryCatalog,
        enrollments: InMemoryEnrollmentStore,
        progress: InMemoryProgressRepository,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let enrollments = Arc::new(enrollments);
        Self {
            courses: catalog.clone(),
            modules: catalog,
            progress: Arc::new(progress),
            enrollment_checker: enrollments.clone(),
            enrollment_reader: enrollments,
        }
    }

    pub fn list_courses_handler(&self) -> ListCoursesHandler {
        ListCoursesHandler::new(self.courses.clone())
    }

    pub fn get_course_handler(&self) -> GetCourseHandler {
        GetCourseHandler::new(self.courses.clone())
    }

    pub fn list_my_enrollments_handler(&self) -> ListMyEnrollmentsHandler {
        ListMyEnrollmentsHandler::new(self.enrollment_reader.clone(), self.courses.clone())
    }

    pub fn list_modules_handler(&self) -> ListModulesHandler {
        ListModulesHandler::new(
            self.courses.clone(),
            self.modules.clone(),
            self.progress.clone(),
            self.enrollment_checker.clone(),
        )
    }

    pub fn get_module_handler(&self) -> GetModuleHandler {
        GetModuleHandler::new(
            self.modules.clone(),
            self.progress.clone(),
            self.enrollment_checker.clone(),
        )
    }

    pub fn get_quiz_handler(&self) -> GetQuizHandler {
        GetQuizHandler::new(
            self.modules.clone(),
            self.progress.clone(),
            self.enrollment_checker.clone(),
        )
    }

    pub fn submit_quiz_handler(&self) -> SubmitQuizHandler {
        SubmitQuizHandler::new(
            self.modules.clone(),
            self.progress.clone(),
            self.enrollment_checker.clone(),
        )
    }

    pub fn course_progress_handler(&self) -> GetCourseProgressHandler {
        GetCourseProgressHandler::new(
            self.courses.clone(),
            self.modules.clone(),
            self.progress.clone(),
            self.enrollment_checker.clone(),
        )
    }
}
