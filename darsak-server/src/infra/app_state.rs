use std::{fmt, sync::Arc};

use darsak_core::application::unit_of_work::AppUnitOfWork;
use darsak_core::devices::DeviceSessionLimiter;
use darsak_core::entitlement::EntitlementService;

use crate::auth::TokenVerifier;
use crate::infra::config::Config;

/// Shared per-process handles. Everything here is immutable after startup;
/// per-request state lives in the database.
#[derive(Clone)]
pub struct AppState {
    pub entitlements: Arc<EntitlementService>,
    pub devices: Arc<DeviceSessionLimiter>,
    pub tokens: Arc<TokenVerifier>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(config: Arc<Config>, unit_of_work: AppUnitOfWork) -> Self {
        let entitlements =
            EntitlementService::from_unit_of_work(&unit_of_work);
        let devices = DeviceSessionLimiter::from_unit_of_work(
            &unit_of_work,
            config.devices,
        );
        let tokens = TokenVerifier::from_config(&config.auth);

        Self {
            entitlements: Arc::new(entitlements),
            devices: Arc::new(devices),
            tokens: Arc::new(tokens),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
