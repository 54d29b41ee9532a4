//! # Darsak Core
//!
//! Policy components and persistence for the Darsak learning platform.
//!
//! ## Overview
//!
//! - **Entitlements**: [`entitlement::evaluate`] decides whether an actor may
//!   view a lesson; [`entitlement::EntitlementService`] loads the rows it
//!   needs and is the single authorization chokepoint for route handlers.
//! - **Device limits**: [`devices::DeviceSessionLimiter`] caps the number of
//!   devices a user may be logged in on.
//! - **Persistence**: repository ports in [`database::ports`] with Postgres
//!   and in-memory adapters.
//!
//! ## Feature Flags
//!
//! - `database` (default): Postgres adapters and embedded migrations.
//!
//! ## Example
//!
//! ```
//! use darsak_core::entitlement::evaluate;
//! use darsak_model::{
//!     Actor, ContentId, ContentItem, Profile, SubjectId, UnitId, UserId,
//! };
//!
//! let actor = Actor::new(Profile::student(UserId::new()));
//! let lesson =
//!     ContentItem::new(ContentId::new(), UnitId::new(), SubjectId::new())
//!         .free();
//! assert!(evaluate(&actor, &lesson).allowed);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub use darsak_model as model;

/// Route paths for the HTTP API
pub mod api;

/// Application-level composition (unit of work)
pub mod application;

/// Repository ports and adapters
pub mod database;

/// Device session limiting
pub mod devices;

/// Content entitlement evaluation
pub mod entitlement;

/// Error types
pub mod error;

pub use error::{CoreError, Result};

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
