//! Core data model definitions shared across Darsak crates.

pub mod access;
pub mod content;
pub mod device;
pub mod error;
pub mod ids;
pub mod profile;
pub mod role;

pub use access::{AccessDecision, AccessReason};
pub use content::{ContentItem, OwnershipGrant};
pub use device::{
    DeviceId, DeviceRegistration, MAX_DEVICE_ID_LEN, MAX_DEVICE_NAME_LEN,
    normalize_device_name,
};
pub use error::{ModelError, Result as ModelResult};
pub use ids::{ContentId, PlanId, SubjectId, UnitId, UserId};
pub use profile::{Actor, Profile};
pub use role::Role;
