//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod catalog;
pub mod enrollment;
pub mod progression;
