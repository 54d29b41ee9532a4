use std::collections::HashSet;

use crate::ids::{ContentId, PlanId, UserId};
use crate::role::Role;

/// Identity plus subscription state, as owned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile {
    pub id: UserId,
    pub role: Role,
    pub is_subscribed: bool,
    pub plan_id: Option<PlanId>,
}

impl Profile {
    pub fn student(id: UserId) -> Self {
        Self {
            id,
            role: Role::Student,
            is_subscribed: false,
            plan_id: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn subscribed_to(mut self, plan: impl Into<PlanId>) -> Self {
        self.is_subscribed = true;
        self.plan_id = Some(plan.into());
        self
    }
}

/// The subject of an access check: a profile and the lessons it owns outright.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub profile: Profile,
    #[cfg_attr(feature = "serde", serde(default))]
    pub owned_content_ids: HashSet<ContentId>,
}

impl Actor {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            owned_content_ids: HashSet::new(),
        }
    }

    pub fn with_owned<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = ContentId>,
    {
        self.owned_content_ids.extend(ids);
        self
    }

    pub fn id(&self) -> UserId {
        self.profile.id
    }

    pub fn role(&self) -> Role {
        self.profile.role
    }

    pub fn owns(&self, content_id: &ContentId) -> bool {
        self.owned_content_ids.contains(content_id)
    }
}
