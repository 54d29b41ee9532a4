use async_trait::async_trait;
use darsak_model::{DeviceId, DeviceRegistration, UserId};

use crate::error::Result;

/// Result of an attempt to claim a device slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotClaim {
    /// The device already held a slot; its `last_active` was bumped.
    Refreshed,
    /// A new row was written.
    Inserted,
    /// The user already holds `active` registrations and nothing was written.
    LimitReached { active: usize },
}

#[async_trait]
pub trait DeviceRegistrationRepository: Send + Sync {
    /// Refresh, or insert if the user holds fewer than `max_devices` rows.
    ///
    /// Implementations must make the refresh/count/insert sequence atomic per
    /// user so that concurrent logins cannot push the count past the cap.
    /// Fails with [`CoreError::NotFound`] when the user has no profile.
    ///
    /// [`CoreError::NotFound`]: crate::error::CoreError::NotFound
    async fn claim_slot(
        &self,
        registration: &DeviceRegistration,
        max_devices: usize,
    ) -> Result<SlotClaim>;

    /// Returns `false` when no row matched.
    async fn release(
        &self,
        user_id: UserId,
        device_id: &DeviceId,
    ) -> Result<bool>;

    /// Most recently active first.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<DeviceRegistration>>;
}
