//! HTTP adapters - REST API implementations.
//!
//! Each area has its own DTOs, handlers and routes; `router` assembles them
//! under `/api` behind the auth middleware.

pub mod catalog;
pub mod dto;
pub mod enrollment;
pub mod middleware;
pub mod progression;
pub mod router;
pub mod state;

pub use dto::{ErrorResponse, HealthResponse};
pub use router::api_router;
pub use state::AppState;
