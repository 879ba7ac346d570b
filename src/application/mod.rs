//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::catalog::{GetCourseHandler, GetCourseQuery, ListCoursesHandler, ListCoursesQuery};
pub use handlers::enrollment::{EnrolledCourse, ListMyEnrollmentsHandler, ListMyEnrollmentsQuery};
pub use handlers::progression::{
    GetCourseProgressHandler, GetCourseProgressQuery, GetModuleHandler, GetModuleQuery,
    GetQuizHandler, GetQuizQuery, ListModulesHandler, ListModulesQuery, ModuleDetail,
    ModuleWithProgress, QuizView, SubmitQuizCommand, SubmitQuizHandler, SubmitQuizResult,
};
