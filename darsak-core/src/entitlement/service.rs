use std::fmt;
use std::sync::Arc;

use darsak_model::{
    AccessDecision, Actor, ContentId, ContentItem, OwnershipGrant, UserId,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::application::unit_of_work::AppUnitOfWork;
use crate::database::ports::{
    content::ContentRepository, ownership::OwnershipRepository,
    profiles::ProfileRepository,
};
use crate::entitlement::evaluate;
use crate::error::CoreError;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("System error")]
    System(#[source] CoreError),
}

impl From<CoreError> for AccessError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(what) => AccessError::NotFound(what),
            other => {
                error!(error = %other, "entitlement lookup failed");
                AccessError::System(other)
            }
        }
    }
}

pub struct EntitlementService {
    profiles: Arc<dyn ProfileRepository>,
    content: Arc<dyn ContentRepository>,
    ownership: Arc<dyn OwnershipRepository>,
}

impl fmt::Debug for EntitlementService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitlementService").finish_non_exhaustive()
    }
}

impl EntitlementService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        content: Arc<dyn ContentRepository>,
        ownership: Arc<dyn OwnershipRepository>,
    ) -> Self {
        Self {
            profiles,
            content,
            ownership,
        }
    }

    pub fn from_unit_of_work(uow: &AppUnitOfWork) -> Self {
        Self::new(
            uow.profiles.clone(),
            uow.content.clone(),
            uow.ownership.clone(),
        )
    }

    /// Profile plus ownership ids for `user_id`.
    pub async fn load_actor(
        &self,
        user_id: UserId,
    ) -> Result<Actor, AccessError> {
        let profile = self
            .profiles
            .find_profile(user_id)
            .await?
            .ok_or_else(|| {
                AccessError::NotFound(format!("profile {user_id}"))
            })?;
        let owned = self.ownership.owned_content_ids(user_id).await?;

        Ok(Actor::new(profile).with_owned(owned))
    }

    async fn load_content(
        &self,
        content_id: ContentId,
    ) -> Result<ContentItem, AccessError> {
        self.content
            .find_content(content_id)
            .await?
            .ok_or_else(|| {
                AccessError::NotFound(format!("lesson {content_id}"))
            })
    }

    /// Evaluate access for `user_id` to `content_id`.
    ///
    /// A denial is `Ok` with `allowed == false`; only missing rows and
    /// storage failures are errors.
    pub async fn check_access(
        &self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<AccessDecision, AccessError> {
        let actor = self.load_actor(user_id).await?;
        let content = self.load_content(content_id).await?;
        let decision = evaluate(&actor, &content);

        debug!(
            user_id = %user_id,
            content_id = %content_id,
            allowed = decision.allowed,
            reason = %decision.reason,
            "entitlement evaluated"
        );

        Ok(decision)
    }

    async fn require_admin(&self, granter: UserId) -> Result<(), AccessError> {
        let actor = self.load_actor(granter).await?;
        if !actor.role().is_admin() {
            warn!(
                user_id = %granter,
                role = %actor.role(),
                "non-admin ownership change refused"
            );
            return Err(AccessError::Forbidden(
                "Admin access required".to_string(),
            ));
        }
        Ok(())
    }

    /// Record an ad-hoc purchase. Returns `false` if the grant already existed.
    pub async fn grant_ownership(
        &self,
        granter: UserId,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<bool, AccessError> {
        self.require_admin(granter).await?;
        self.profiles
            .find_profile(user_id)
            .await?
            .ok_or_else(|| {
                AccessError::NotFound(format!("profile {user_id}"))
            })?;
        self.load_content(content_id).await?;

        let created = self.ownership.grant(user_id, content_id).await?;
        info!(
            granter = %granter,
            user_id = %user_id,
            content_id = %content_id,
            created,
            "ownership granted"
        );
        Ok(created)
    }

    /// Returns `false` if there was no grant to remove.
    pub async fn revoke_ownership(
        &self,
        granter: UserId,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<bool, AccessError> {
        self.require_admin(granter).await?;

        let removed = self.ownership.revoke(user_id, content_id).await?;
        info!(
            granter = %granter,
            user_id = %user_id,
            content_id = %content_id,
            removed,
            "ownership revoked"
        );
        Ok(removed)
    }

    pub async fn list_owned(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OwnershipGrant>, AccessError> {
        Ok(self.ownership.list_grants(user_id).await?)
    }
}
