use darsak_model::{AccessDecision, AccessReason, Actor, ContentItem};

/// Decide whether `actor` may view `content`. First matching rule wins.
pub fn evaluate(actor: &Actor, content: &ContentItem) -> AccessDecision {
    if actor.role().is_staff() {
        return AccessDecision::allow(AccessReason::AdminBypass);
    }

    if !content.published {
        return AccessDecision::deny(AccessReason::ContentUnpublished);
    }

    if content.is_free {
        return AccessDecision::allow(AccessReason::ContentFree);
    }

    if actor.owns(&content.id) {
        return AccessDecision::allow(AccessReason::OwnershipGrant);
    }

    if let Some(required) = &content.required_plan_id {
        let profile = &actor.profile;
        if !profile.is_subscribed {
            return AccessDecision::deny(AccessReason::SubscriptionRequired);
        }
        return match &profile.plan_id {
            Some(plan) if plan == required => {
                AccessDecision::allow(AccessReason::PlanMatch)
            }
            _ => AccessDecision::deny(AccessReason::PlanMismatch),
        };
    }

    AccessDecision::deny(AccessReason::UnknownRestriction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use darsak_model::{ContentId, Profile, Role, SubjectId, UnitId, UserId};

    fn lesson() -> ContentItem {
        ContentItem::new(ContentId::new(), UnitId::new(), SubjectId::new())
    }

    fn student() -> Actor {
        Actor::new(Profile::student(UserId::new()))
    }

    fn subscriber(plan: &str) -> Actor {
        Actor::new(Profile::student(UserId::new()).subscribed_to(plan))
    }

    fn content_variants() -> Vec<ContentItem> {
        vec![
            lesson(),
            lesson().free(),
            lesson().unpublished(),
            lesson().unpublished().free(),
            lesson().requiring_plan("premium"),
            lesson().requiring_plan("premium").unpublished(),
        ]
    }

    #[test]
    fn staff_always_allowed() {
        for role in [Role::Admin, Role::Teacher] {
            let actor =
                Actor::new(Profile::student(UserId::new()).with_role(role));
            for content in content_variants() {
                let decision = evaluate(&actor, &content);
                assert_eq!(
                    decision,
                    AccessDecision::allow(AccessReason::AdminBypass)
                );
            }
        }
    }

    #[test]
    fn unpublished_denied_for_students_even_if_free_or_owned() {
        let content = lesson().unpublished().free();
        let actor = student().with_owned([content.id]);
        assert_eq!(
            evaluate(&actor, &content),
            AccessDecision::deny(AccessReason::ContentUnpublished)
        );

        let subscriber = subscriber("premium");
        let premium = lesson().requiring_plan("premium").unpublished();
        assert!(!evaluate(&subscriber, &premium).allowed);
    }

    #[test]
    fn free_published_content_is_open_to_anyone() {
        let content = lesson().free().requiring_plan("premium");
        for actor in [
            student(),
            subscriber("basic"),
        ] {
            assert_eq!(
                evaluate(&actor, &content),
                AccessDecision::allow(AccessReason::ContentFree)
            );
        }
    }

    #[test]
    fn ownership_grant_covers_only_the_granted_lesson() {
        let owned = lesson().requiring_plan("premium");
        let other = lesson().requiring_plan("premium");
        let actor = student().with_owned([owned.id]);

        assert_eq!(
            evaluate(&actor, &owned),
            AccessDecision::allow(AccessReason::OwnershipGrant)
        );
        assert_eq!(
            evaluate(&actor, &other),
            AccessDecision::deny(AccessReason::SubscriptionRequired)
        );
    }

    #[test]
    fn unsubscribed_student_needs_subscription() {
        let content = lesson().requiring_plan("premium");
        let decision = evaluate(&student(), &content);
        assert!(!decision.allowed);
        assert_eq!(decision.reason.as_str(), "subscription_required");
    }

    #[test]
    fn subscribed_to_other_plan_is_a_mismatch() {
        let actor = subscriber("basic");
        let content = lesson().requiring_plan("premium");
        let decision = evaluate(&actor, &content);
        assert!(!decision.allowed);
        assert_eq!(decision.reason.as_str(), "plan_mismatch");
    }

    #[test]
    fn subscribed_flag_without_plan_is_a_mismatch() {
        let mut profile = Profile::student(UserId::new());
        profile.is_subscribed = true;
        let decision =
            evaluate(&Actor::new(profile), &lesson().requiring_plan("premium"));
        assert_eq!(decision, AccessDecision::deny(AccessReason::PlanMismatch));
    }

    #[test]
    fn matching_plan_is_allowed() {
        let actor = subscriber("premium");
        let decision = evaluate(&actor, &lesson().requiring_plan("premium"));
        assert_eq!(decision, AccessDecision::allow(AccessReason::PlanMatch));
    }

    #[test]
    fn paid_lesson_without_plan_falls_through() {
        let actor = subscriber("premium");
        assert_eq!(
            evaluate(&actor, &lesson()),
            AccessDecision::deny(AccessReason::UnknownRestriction)
        );
    }
}
