//! In-memory adapters.
//!
//! Back the application in development mode (catalog from a YAML seed) and
//! in tests.

mod catalog_store;
mod enrollment_store;
mod progress_store;

pub use catalog_store::InMemoryCatalog;
pub use enrollment_store::InMemoryEnrollmentStore;
pub use progress_store::InMemoryProgressRepository;
