use std::collections::HashSet;

use async_trait::async_trait;
use darsak_model::{ContentId, OwnershipGrant, UserId};

use crate::error::Result;

#[async_trait]
pub trait OwnershipRepository: Send + Sync {
    async fn owned_content_ids(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<ContentId>>;

    async fn list_grants(&self, user_id: UserId) -> Result<Vec<OwnershipGrant>>;

    /// Returns `false` when the grant already existed.
    async fn grant(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<bool>;

    /// Returns `false` when there was nothing to revoke.
    async fn revoke(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<bool>;
}
