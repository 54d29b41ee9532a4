use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::database::InMemoryStore;
use crate::database::ports::{
    content::ContentRepository, devices::DeviceRegistrationRepository,
    ownership::OwnershipRepository, profiles::ProfileRepository,
};
#[cfg(feature = "database")]
use crate::database::{
    PostgresContentRepository, PostgresDeviceRegistrationRepository,
    PostgresOwnershipRepository, PostgresProfileRepository,
};

/// Aggregates the repository ports the policy services are built from.
///
/// Constructed once at startup and handed to each service explicitly.
#[derive(Clone)]
pub struct AppUnitOfWork {
    pub profiles: Arc<dyn ProfileRepository>,
    pub content: Arc<dyn ContentRepository>,
    pub ownership: Arc<dyn OwnershipRepository>,
    pub devices: Arc<dyn DeviceRegistrationRepository>,
}

impl fmt::Debug for AppUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWork")
            .field("profiles", &type_name_of_val(self.profiles.as_ref()))
            .field("content", &type_name_of_val(self.content.as_ref()))
            .field("ownership", &type_name_of_val(self.ownership.as_ref()))
            .field("devices", &type_name_of_val(self.devices.as_ref()))
            .finish()
    }
}

impl AppUnitOfWork {
    #[cfg(feature = "database")]
    pub fn from_postgres(pool: sqlx::PgPool) -> Self {
        Self {
            profiles: Arc::new(PostgresProfileRepository::new(pool.clone())),
            content: Arc::new(PostgresContentRepository::new(pool.clone())),
            ownership: Arc::new(PostgresOwnershipRepository::new(pool.clone())),
            devices: Arc::new(PostgresDeviceRegistrationRepository::new(pool)),
        }
    }

    pub fn in_memory(store: &InMemoryStore) -> Self {
        let store = Arc::new(store.clone());
        Self {
            profiles: store.clone(),
            content: store.clone(),
            ownership: store.clone(),
            devices: store,
        }
    }
}

#[derive(Default)]
pub struct AppUnitOfWorkBuilder {
    profiles: Option<Arc<dyn ProfileRepository>>,
    content: Option<Arc<dyn ContentRepository>>,
    ownership: Option<Arc<dyn OwnershipRepository>>,
    devices: Option<Arc<dyn DeviceRegistrationRepository>>,
}

impl fmt::Debug for AppUnitOfWorkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWorkBuilder")
            .field("profiles", &self.profiles.is_some())
            .field("content", &self.content.is_some())
            .field("ownership", &self.ownership.is_some())
            .field("devices", &self.devices.is_some())
            .finish()
    }
}

impl AppUnitOfWorkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profiles = Some(repo);
        self
    }

    pub fn with_content(mut self, repo: Arc<dyn ContentRepository>) -> Self {
        self.content = Some(repo);
        self
    }

    pub fn with_ownership(
        mut self,
        repo: Arc<dyn OwnershipRepository>,
    ) -> Self {
        self.ownership = Some(repo);
        self
    }

    pub fn with_devices(
        mut self,
        repo: Arc<dyn DeviceRegistrationRepository>,
    ) -> Self {
        self.devices = Some(repo);
        self
    }

    /// Fill every slot with the same in-memory store. Slots set earlier are
    /// overwritten, so call this first when mixing adapters in tests.
    pub fn with_in_memory(self, store: &InMemoryStore) -> Self {
        let store = Arc::new(store.clone());
        self.with_profiles(store.clone())
            .with_content(store.clone())
            .with_ownership(store.clone())
            .with_devices(store)
    }

    pub fn build(self) -> Result<AppUnitOfWork, String> {
        Ok(AppUnitOfWork {
            profiles: self
                .profiles
                .ok_or_else(|| "missing ProfileRepository".to_string())?,
            content: self
                .content
                .ok_or_else(|| "missing ContentRepository".to_string())?,
            ownership: self
                .ownership
                .ok_or_else(|| "missing OwnershipRepository".to_string())?,
            devices: self.devices.ok_or_else(|| {
                "missing DeviceRegistrationRepository".to_string()
            })?,
        })
    }
}

#[cfg(feature = "database")]
impl AppUnitOfWorkBuilder {
    /// Populate the builder with Postgres-backed repository adapters.
    pub fn with_postgres(self, pool: sqlx::PgPool) -> Self {
        let profiles = PostgresProfileRepository::new(pool.clone());
        let content = PostgresContentRepository::new(pool.clone());
        let ownership = PostgresOwnershipRepository::new(pool.clone());
        let devices = PostgresDeviceRegistrationRepository::new(pool);

        self.with_profiles(Arc::new(profiles))
            .with_content(Arc::new(content))
            .with_ownership(Arc::new(ownership))
            .with_devices(Arc::new(devices))
    }
}
