//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `catalog` - Courses, modules and their assessments
//! - `enrollment` - Course purchases and payment status
//! - `progression` - Module unlocking, quiz grading and course progress

pub mod catalog;
pub mod enrollment;
pub mod foundation;
pub mod progression;
