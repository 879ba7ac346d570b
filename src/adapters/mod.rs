//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session token validation (JWT, mock)
//! - `http` - axum routes, DTOs and middleware
//! - `memory` - In-memory stores for development and tests
//! - `postgres` - PostgreSQL-backed stores
//! - `seed` - YAML catalog loader for the in-memory stores

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod seed;

pub use auth::{JwtSessionValidator, MockSessionValidator};
pub use memory::{InMemoryCatalog, InMemoryEnrollmentStore, InMemoryProgressRepository};
pub use postgres::{PostgresCatalogReader, PostgresEnrollmentStore, PostgresProgressRepository};
pub use seed::{CatalogSeed, SeedError, SeedSummary};
