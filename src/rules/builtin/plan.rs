//! Hosting plan sizing rules.

use crate::rules::{Category, Rule, Severity};

/// APPSVC-012: Free or Shared tier
pub(super) const PLAN_TIER: Rule = Rule {
    id: "APPSVC-012",
    name: "Plan Tier",
    title: "Using Free or Shared tier",
    severity: Severity::High,
    category: Category::Reliability,
    recommendation: "Upgrade to at least Basic tier for production workloads: az appservice plan update --sku B1",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/overview-hosting-plans"),
    command: None,
    check: |r| {
        r.plan.tier.is_free_or_shared().then_some(
            "Free/Shared tiers have limited resources, no SLA, and lack production features.".into(),
        )
    },
};

/// APPSVC-013: Single instance
pub(super) const SINGLE_INSTANCE: Rule = Rule {
    id: "APPSVC-013",
    name: "Single Instance",
    title: "Single instance configuration",
    severity: Severity::Medium,
    category: Category::Reliability,
    recommendation: "Scale to at least 2 instances or enable autoscaling for production apps",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/manage-scale-up"),
    command: None,
    check: |r| {
        (r.plan.tier.is_dedicated() && r.plan.capacity == 1).then_some(
            "Running on a single instance - no redundancy for high availability.".into(),
        )
    },
};

/// APPSVC-014: Zone redundancy
pub(super) const ZONE_REDUNDANCY: Rule = Rule {
    id: "APPSVC-014",
    name: "Zone Redundancy",
    title: "Zone redundancy not enabled",
    severity: Severity::Low,
    category: Category::Reliability,
    recommendation: "Consider enabling zone redundancy for critical production apps",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/how-to-zone-redundancy"),
    command: None,
    check: |r| {
        (r.plan.tier.supports_zone_redundancy() && !r.plan.zone_redundant).then_some(
            "Zone redundancy provides higher availability across Azure availability zones.".into(),
        )
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{HostingPlan, PlanTier, ResourceRecord};

    fn on_plan(tier: PlanTier, capacity: i64, zone_redundant: bool) -> ResourceRecord {
        ResourceRecord {
            plan: HostingPlan {
                tier,
                capacity,
                zone_redundant,
            },
            ..Default::default()
        }
    }

    #[test]
    fn free_and_shared_fire_high() {
        for tier in [PlanTier::Free, PlanTier::Shared] {
            let f = PLAN_TIER.evaluate(&on_plan(tier, 1, false)).unwrap();
            assert_eq!(f.severity, Severity::High);
            assert_eq!(f.category, Category::Reliability);
        }
        assert!(PLAN_TIER.evaluate(&on_plan(PlanTier::Basic, 1, false)).is_none());
        assert!(PLAN_TIER.evaluate(&ResourceRecord::default()).is_none());
    }

    #[test]
    fn single_instance_on_dedicated_tier() {
        assert!(SINGLE_INSTANCE
            .evaluate(&on_plan(PlanTier::Standard, 1, false))
            .is_some());
        assert!(SINGLE_INSTANCE
            .evaluate(&on_plan(PlanTier::Standard, 2, false))
            .is_none());
        assert!(SINGLE_INSTANCE
            .evaluate(&on_plan(PlanTier::Free, 1, false))
            .is_none());
        assert!(SINGLE_INSTANCE
            .evaluate(&on_plan(PlanTier::Standard, -1, false))
            .is_none());
        assert!(SINGLE_INSTANCE.evaluate(&ResourceRecord::default()).is_none());
    }

    #[test]
    fn zone_redundancy_only_on_premium_v2_and_v3() {
        assert!(ZONE_REDUNDANCY
            .evaluate(&on_plan(PlanTier::PremiumV3, 3, false))
            .is_some());
        assert!(ZONE_REDUNDANCY
            .evaluate(&on_plan(PlanTier::PremiumV2, 3, false))
            .is_some());
        assert!(ZONE_REDUNDANCY
            .evaluate(&on_plan(PlanTier::PremiumV3, 3, true))
            .is_none());
        assert!(ZONE_REDUNDANCY
            .evaluate(&on_plan(PlanTier::Premium, 3, false))
            .is_none());
    }
}
