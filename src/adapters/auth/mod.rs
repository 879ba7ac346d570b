//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - HS256 tokens from the platform's login service
//! - `mock` - Test implementation that accepts registered tokens

mod jwt;
mod mock;

pub use jwt::{JwtSessionValidator, LearnerClaims};
pub use mock::MockSessionValidator;
