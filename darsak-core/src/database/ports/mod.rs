//! Repository ports (interfaces) for the rows the policy components read and
//! write. Postgres adapters live under `database::infrastructure::postgres`,
//! the in-memory adapter under `database::infrastructure::memory`.

pub mod content;
pub mod devices;
pub mod ownership;
pub mod profiles;
