use std::fmt;
use std::sync::Arc;

use darsak_model::{DeviceId, DeviceRegistration, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::application::unit_of_work::AppUnitOfWork;
use crate::database::ports::devices::{
    DeviceRegistrationRepository, SlotClaim,
};
use crate::devices::messages::{Locale, device_limit_message};
use crate::error::CoreError;

pub const DEFAULT_MAX_DEVICES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceLimitPolicy {
    pub max_devices: usize,
    pub locale: Locale,
}

impl Default for DeviceLimitPolicy {
    fn default() -> Self {
        Self {
            max_devices: DEFAULT_MAX_DEVICES,
            locale: Locale::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceRegistrationOutcome {
    Registered,
    Refreshed,
}

#[derive(Debug, Error)]
pub enum DeviceError {
    /// Every slot is taken. `message` is the localized text for the client.
    #[error("{message}")]
    LimitReached { max_devices: usize, message: String },

    /// The user has no profile to attach the device to.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("System error")]
    System(#[source] CoreError),
}

impl From<CoreError> for DeviceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(what) => DeviceError::NotFound(what),
            other => DeviceError::System(other),
        }
    }
}

pub struct DeviceSessionLimiter {
    repo: Arc<dyn DeviceRegistrationRepository>,
    policy: DeviceLimitPolicy,
}

impl fmt::Debug for DeviceSessionLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceSessionLimiter")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl DeviceSessionLimiter {
    pub fn new(
        repo: Arc<dyn DeviceRegistrationRepository>,
        policy: DeviceLimitPolicy,
    ) -> Self {
        Self { repo, policy }
    }

    pub fn from_unit_of_work(
        uow: &AppUnitOfWork,
        policy: DeviceLimitPolicy,
    ) -> Self {
        Self::new(uow.devices.clone(), policy)
    }

    pub fn policy(&self) -> DeviceLimitPolicy {
        self.policy
    }

    /// Claim a login slot for `device_id`.
    ///
    /// Re-registering a known device only refreshes its activity timestamp.
    /// A new device is refused once the user holds `max_devices` slots; no
    /// existing slot is evicted. A user without a profile gets
    /// [`DeviceError::NotFound`].
    pub async fn register_device(
        &self,
        user_id: UserId,
        device_id: DeviceId,
        device_name: &str,
    ) -> Result<DeviceRegistrationOutcome, DeviceError> {
        let registration =
            DeviceRegistration::new(user_id, device_id, device_name);
        let claim = self
            .repo
            .claim_slot(&registration, self.policy.max_devices)
            .await
            .map_err(|err| {
                match &err {
                    CoreError::NotFound(_) => {
                        warn!(user_id = %user_id, "device for unknown profile")
                    }
                    _ => error!(
                        user_id = %user_id,
                        error = %err,
                        "device registration failed"
                    ),
                }
                DeviceError::from(err)
            })?;

        match claim {
            SlotClaim::Refreshed => Ok(DeviceRegistrationOutcome::Refreshed),
            SlotClaim::Inserted => {
                info!(
                    user_id = %user_id,
                    device_id = %registration.device_id,
                    "device registered"
                );
                Ok(DeviceRegistrationOutcome::Registered)
            }
            SlotClaim::LimitReached { active } => {
                warn!(
                    user_id = %user_id,
                    device_id = %registration.device_id,
                    active,
                    max = self.policy.max_devices,
                    "device limit reached"
                );
                Err(DeviceError::LimitReached {
                    max_devices: self.policy.max_devices,
                    message: device_limit_message(
                        self.policy.locale,
                        self.policy.max_devices,
                    ),
                })
            }
        }
    }

    /// Release the slot held by `device_id`. Absent rows are not an error.
    pub async fn unregister_device(
        &self,
        user_id: UserId,
        device_id: &DeviceId,
    ) -> Result<(), DeviceError> {
        let removed =
            self.repo.release(user_id, device_id).await.inspect_err(|err| {
                error!(
                    user_id = %user_id,
                    error = %err,
                    "device release failed"
                );
            })?;
        if removed {
            info!(
                user_id = %user_id,
                device_id = %device_id,
                "device unregistered"
            );
        }
        Ok(())
    }

    pub async fn list_devices(
        &self,
        user_id: UserId,
    ) -> Result<Vec<DeviceRegistration>, DeviceError> {
        Ok(self.repo.list_for_user(user_id).await?)
    }
}
