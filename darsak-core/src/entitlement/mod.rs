//! Content entitlement: whether an actor may view a lesson.
//!
//! [`evaluate`] is the pure rule chain; [`EntitlementService`] loads the
//! rows it needs and is the one place route handlers ask for access.

mod evaluator;
mod service;

pub use evaluator::evaluate;
pub use service::{AccessError, EntitlementService};
