//! Catalog - courses, their modules and module assessments.
//!
//! The catalog is read-only to the progression engine.

mod assessment;
mod course;
mod errors;
mod module;

pub use assessment::{Assessment, PublicQuestion, QuizQuestion};
pub use course::{Course, CourseLevel, CourseTrack};
pub use errors::CatalogError;
pub use module::{validate_sequence, Exercise, Module, ModuleContent, ModulePosition, ModuleSummary};

#[cfg(test)]
pub(crate) mod fixtures {
    pub use super::assessment::fixtures::*;
    pub use super::course::fixtures::*;
    pub use super::module::fixtures::*;
}
