//! # Darsak Server
//!
//! HTTP boundary for the Darsak learning platform. Route handlers
//! authenticate the caller from the identity provider's bearer token and ask
//! the core policy components for a decision:
//!
//! - `GET /api/v1/lessons/{lesson_id}/access`: entitlement check
//! - `GET|POST /api/v1/devices`, `DELETE /api/v1/devices/{device_id}`:
//!   device slot management
//! - `PUT|DELETE /api/v1/admin/users/{user_id}/ownership/{lesson_id}`:
//!   ownership grants
//!
//! Persistence is PostgreSQL through `darsak-core`'s repositories.

pub mod auth;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
pub use routes::create_app;
