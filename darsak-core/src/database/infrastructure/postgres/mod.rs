//! Postgres adapters. Every repository shares the pool handed to it at
//! construction; nothing here caches a process-wide client.

mod content;
mod devices;
mod ownership;
mod profiles;

pub use content::PostgresContentRepository;
pub use devices::PostgresDeviceRegistrationRepository;
pub use ownership::PostgresOwnershipRepository;
pub use profiles::PostgresProfileRepository;
