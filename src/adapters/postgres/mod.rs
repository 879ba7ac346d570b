//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresCatalogReader` - Courses and modules (content stored as JSONB)
//! - `PostgresProgressRepository` - Per-learner module progress
//! - `PostgresEnrollmentStore` - Paid enrollment lookups

mod catalog_reader;
mod enrollment_store;
mod progress_repository;

pub use catalog_reader::PostgresCatalogReader;
pub use enrollment_store::PostgresEnrollmentStore;
pub use progress_repository::PostgresProgressRepository;
