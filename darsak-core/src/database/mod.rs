//! Persistence: repository ports and their adapters.

pub mod infrastructure;
pub mod ports;

pub use infrastructure::memory::InMemoryStore;

#[cfg(feature = "database")]
pub use infrastructure::postgres::{
    PostgresContentRepository, PostgresDeviceRegistrationRepository,
    PostgresOwnershipRepository, PostgresProfileRepository,
};

/// Open a pool against `database_url` with at most `max_connections`.
#[cfg(feature = "database")]
pub async fn connect(
    database_url: &str,
    max_connections: u32,
) -> crate::error::Result<sqlx::PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}
