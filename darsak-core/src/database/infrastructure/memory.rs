//! In-memory adapter implementing every repository port.
//!
//! Used by the test suites. A single lock guards all tables, which also
//! makes `claim_slot` atomic.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use darsak_model::{
    ContentId, ContentItem, DeviceId, DeviceRegistration, OwnershipGrant,
    Profile, UserId,
};
use parking_lot::RwLock;

use crate::database::ports::{
    content::ContentRepository,
    devices::{DeviceRegistrationRepository, SlotClaim},
    ownership::OwnershipRepository,
    profiles::ProfileRepository,
};
use crate::error::{CoreError, Result};

#[derive(Debug, Default)]
struct Tables {
    profiles: HashMap<UserId, Profile>,
    content: HashMap<ContentId, ContentItem>,
    ownership: HashMap<UserId, Vec<OwnershipGrant>>,
    devices: HashMap<UserId, Vec<DeviceRegistration>>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_profile(&self, profile: Profile) {
        self.tables.write().profiles.insert(profile.id, profile);
    }

    pub fn upsert_content(&self, item: ContentItem) {
        self.tables.write().content.insert(item.id, item);
    }

    pub fn device_count(&self, user_id: UserId) -> usize {
        self.tables
            .read()
            .devices
            .get(&user_id)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_profile(&self, user_id: UserId) -> Result<Option<Profile>> {
        Ok(self.tables.read().profiles.get(&user_id).cloned())
    }
}

#[async_trait]
impl ContentRepository for InMemoryStore {
    async fn find_content(
        &self,
        content_id: ContentId,
    ) -> Result<Option<ContentItem>> {
        Ok(self.tables.read().content.get(&content_id).cloned())
    }
}

#[async_trait]
impl OwnershipRepository for InMemoryStore {
    async fn owned_content_ids(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<ContentId>> {
        Ok(self
            .tables
            .read()
            .ownership
            .get(&user_id)
            .map(|grants| grants.iter().map(|g| g.content_id).collect())
            .unwrap_or_default())
    }

    async fn list_grants(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OwnershipGrant>> {
        let mut grants = self
            .tables
            .read()
            .ownership
            .get(&user_id)
            .cloned()
            .unwrap_or_default();
        grants.sort_by(|a, b| b.granted_at.cmp(&a.granted_at));
        Ok(grants)
    }

    async fn grant(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<bool> {
        let mut tables = self.tables.write();
        let grants = tables.ownership.entry(user_id).or_default();
        if grants.iter().any(|g| g.content_id == content_id) {
            return Ok(false);
        }
        grants.push(OwnershipGrant {
            user_id,
            content_id,
            granted_at: Utc::now(),
        });
        Ok(true)
    }

    async fn revoke(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<bool> {
        let mut tables = self.tables.write();
        let Some(grants) = tables.ownership.get_mut(&user_id) else {
            return Ok(false);
        };
        let before = grants.len();
        grants.retain(|g| g.content_id != content_id);
        Ok(grants.len() != before)
    }
}

#[async_trait]
impl DeviceRegistrationRepository for InMemoryStore {
    async fn claim_slot(
        &self,
        registration: &DeviceRegistration,
        max_devices: usize,
    ) -> Result<SlotClaim> {
        let mut tables = self.tables.write();
        if !tables.profiles.contains_key(&registration.user_id) {
            return Err(CoreError::NotFound(format!(
                "profile {}",
                registration.user_id
            )));
        }
        let devices = tables.devices.entry(registration.user_id).or_default();

        if let Some(existing) = devices
            .iter_mut()
            .find(|d| d.device_id == registration.device_id)
        {
            existing.last_active = registration.last_active;
            return Ok(SlotClaim::Refreshed);
        }

        if devices.len() >= max_devices {
            return Ok(SlotClaim::LimitReached {
                active: devices.len(),
            });
        }

        devices.push(registration.clone());
        Ok(SlotClaim::Inserted)
    }

    async fn release(
        &self,
        user_id: UserId,
        device_id: &DeviceId,
    ) -> Result<bool> {
        let mut tables = self.tables.write();
        let Some(devices) = tables.devices.get_mut(&user_id) else {
            return Ok(false);
        };
        let before = devices.len();
        devices.retain(|d| &d.device_id != device_id);
        Ok(devices.len() != before)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<DeviceRegistration>> {
        let mut devices = self
            .tables
            .read()
            .devices
            .get(&user_id)
            .cloned()
            .unwrap_or_default();
        devices.sort_by(|a, b| b.last_active.cmp(&a.last_active));
        Ok(devices)
    }
}
