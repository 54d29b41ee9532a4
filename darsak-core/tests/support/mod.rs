#![allow(dead_code)]

use std::collections::HashSet;

use async_trait::async_trait;
use darsak_core::database::InMemoryStore;
use darsak_core::database::ports::{
    content::ContentRepository,
    devices::{DeviceRegistrationRepository, SlotClaim},
    ownership::OwnershipRepository,
    profiles::ProfileRepository,
};
use darsak_core::{CoreError, Result};
use darsak_model::{
    ContentId, ContentItem, DeviceId, DeviceRegistration, OwnershipGrant,
    Profile, SubjectId, UnitId, UserId,
};

pub fn lesson() -> ContentItem {
    ContentItem::new(ContentId::new(), UnitId::new(), SubjectId::new())
}

/// A student with a stored profile, as after sign-up.
pub fn enrolled(store: &InMemoryStore) -> UserId {
    let user = UserId::new();
    store.upsert_profile(Profile::student(user));
    user
}

pub fn device(raw: &str) -> DeviceId {
    DeviceId::parse(raw).expect("valid device id")
}

/// Every call fails as if the database were unreachable.
#[derive(Debug, Default, Clone)]
pub struct UnreachableStore;

fn down<T>() -> Result<T> {
    Err(CoreError::Internal("connection refused".to_string()))
}

#[async_trait]
impl ProfileRepository for UnreachableStore {
    async fn find_profile(&self, _user_id: UserId) -> Result<Option<Profile>> {
        down()
    }
}

#[async_trait]
impl ContentRepository for UnreachableStore {
    async fn find_content(
        &self,
        _content_id: ContentId,
    ) -> Result<Option<ContentItem>> {
        down()
    }
}

#[async_trait]
impl OwnershipRepository for UnreachableStore {
    async fn owned_content_ids(
        &self,
        _user_id: UserId,
    ) -> Result<HashSet<ContentId>> {
        down()
    }

    async fn list_grants(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<OwnershipGrant>> {
        down()
    }

    async fn grant(
        &self,
        _user_id: UserId,
        _content_id: ContentId,
    ) -> Result<bool> {
        down()
    }

    async fn revoke(
        &self,
        _user_id: UserId,
        _content_id: ContentId,
    ) -> Result<bool> {
        down()
    }
}

#[async_trait]
impl DeviceRegistrationRepository for UnreachableStore {
    async fn claim_slot(
        &self,
        _registration: &DeviceRegistration,
        _max_devices: usize,
    ) -> Result<SlotClaim> {
        down()
    }

    async fn release(
        &self,
        _user_id: UserId,
        _device_id: &DeviceId,
    ) -> Result<bool> {
        down()
    }

    async fn list_for_user(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<DeviceRegistration>> {
        down()
    }
}
