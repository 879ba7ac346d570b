//! TTI Academy - course progression and quiz grading backend.
//!
//! Learners with a paid enrollment work through a course's modules in
//! order; each module's quiz must be passed to unlock the next.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
