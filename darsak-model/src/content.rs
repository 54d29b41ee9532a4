use chrono::{DateTime, Utc};

use crate::ids::{ContentId, PlanId, SubjectId, UnitId, UserId};

/// A lesson together with the publication flag inherited from its subject.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentItem {
    pub id: ContentId,
    pub unit_id: UnitId,
    pub subject_id: SubjectId,
    pub is_free: bool,
    pub required_plan_id: Option<PlanId>,
    /// Copied from the parent subject; lessons carry no flag of their own.
    pub published: bool,
}

impl ContentItem {
    /// Published, paid lesson with no plan requirement.
    pub fn new(id: ContentId, unit_id: UnitId, subject_id: SubjectId) -> Self {
        Self {
            id,
            unit_id,
            subject_id,
            is_free: false,
            required_plan_id: None,
            published: true,
        }
    }

    pub fn free(mut self) -> Self {
        self.is_free = true;
        self
    }

    pub fn requiring_plan(mut self, plan: impl Into<PlanId>) -> Self {
        self.required_plan_id = Some(plan.into());
        self
    }

    pub fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }
}

/// Ad-hoc purchase of a single lesson, independent of any plan.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnershipGrant {
    pub user_id: UserId,
    pub content_id: ContentId,
    pub granted_at: DateTime<Utc>,
}
