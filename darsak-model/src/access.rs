use std::fmt;

/// Why an access decision came out the way it did.
///
/// The string forms are part of the HTTP contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AccessReason {
    AdminBypass,
    ContentUnpublished,
    ContentFree,
    OwnershipGrant,
    SubscriptionRequired,
    PlanMismatch,
    PlanMatch,
    UnknownRestriction,
}

impl AccessReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessReason::AdminBypass => "admin_bypass",
            AccessReason::ContentUnpublished => "content_unpublished",
            AccessReason::ContentFree => "content_free",
            AccessReason::OwnershipGrant => "ownership_grant",
            AccessReason::SubscriptionRequired => "subscription_required",
            AccessReason::PlanMismatch => "plan_mismatch",
            AccessReason::PlanMatch => "plan_match",
            AccessReason::UnknownRestriction => "unknown_restriction",
        }
    }
}

impl fmt::Display for AccessReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: AccessReason,
}

impl AccessDecision {
    pub fn allow(reason: AccessReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    pub fn deny(reason: AccessReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}
