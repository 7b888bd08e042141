use crate::rules::{Category, Rule, Severity};

/// APPSVC-009: Diagnostic logging
pub(super) const DIAGNOSTIC_LOGS: Rule = Rule {
    id: "APPSVC-009",
    name: "Diagnostic Logs",
    title: "Diagnostic logging not configured",
    severity: Severity::Medium,
    category: Category::Monitoring,
    recommendation: "Enable diagnostic logs using: az webapp log config --application-logging filesystem --level information",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/troubleshoot-diagnostic-logs"),
    command: Some(
        "az webapp log config --resource-group {rg} --name {app} --application-logging filesystem --level information",
    ),
    check: |r| {
        (!r.operability.logs.any_enabled()).then_some(
            "No application or HTTP logging is enabled, making troubleshooting difficult.".into(),
        )
    },
};

/// APPSVC-010: Backups (Standard and Premium tiers only)
pub(super) const BACKUP: Rule = Rule {
    id: "APPSVC-010",
    name: "Backup",
    title: "Backup not configured",
    severity: Severity::Medium,
    category: Category::Reliability,
    recommendation: "Configure automated backups for disaster recovery: az webapp config backup create",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/manage-backup"),
    command: None,
    check: |r| {
        (r.plan.tier.is_standard_or_premium() && r.operability.backups.is_empty())
            .then_some("No backup schedule configured for the App Service.".into())
    },
};

/// APPSVC-011: Deployment slots (Standard and Premium tiers only)
pub(super) const DEPLOYMENT_SLOTS: Rule = Rule {
    id: "APPSVC-011",
    name: "Deployment Slots",
    title: "No deployment slots configured",
    severity: Severity::Low,
    category: Category::DevOps,
    recommendation: "Create a staging slot: az webapp deployment slot create --slot staging",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/deploy-staging-slots"),
    command: Some("az webapp deployment slot create --resource-group {rg} --name {app} --slot staging"),
    check: |r| {
        (r.plan.tier.is_standard_or_premium() && r.operability.deployment_slots.is_empty())
            .then_some("Deployment slots enable zero-downtime deployments and easy rollback.".into())
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{
        BackupConfig, DeploymentSlot, DiagnosticLogs, HostingPlan, PlanTier, ResourceRecord,
    };

    fn on_tier(tier: PlanTier) -> ResourceRecord {
        ResourceRecord {
            plan: HostingPlan {
                tier,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn no_logging_fires_monitoring() {
        let f = DIAGNOSTIC_LOGS.evaluate(&ResourceRecord::default()).unwrap();
        assert_eq!(f.category, Category::Monitoring);
        assert_eq!(f.severity, Severity::Medium);
    }

    #[test]
    fn any_sink_enabled_passes() {
        let mut r = ResourceRecord::default();
        r.operability.logs = DiagnosticLogs {
            http_file_system_enabled: true,
            ..Default::default()
        };
        assert!(DIAGNOSTIC_LOGS.evaluate(&r).is_none());

        r.operability.logs = DiagnosticLogs {
            application_file_system_level: Some("Information".into()),
            ..Default::default()
        };
        assert!(DIAGNOSTIC_LOGS.evaluate(&r).is_none());
    }

    #[test]
    fn backup_and_slots_gated_to_standard_and_premium() {
        for tier in [
            PlanTier::Standard,
            PlanTier::Premium,
            PlanTier::PremiumV2,
            PlanTier::PremiumV3,
        ] {
            let r = on_tier(tier.clone());
            assert!(BACKUP.evaluate(&r).is_some(), "{}", tier);
            assert!(DEPLOYMENT_SLOTS.evaluate(&r).is_some(), "{}", tier);
        }
        for tier in [PlanTier::Free, PlanTier::Basic, PlanTier::Unknown] {
            let r = on_tier(tier.clone());
            assert!(BACKUP.evaluate(&r).is_none(), "{}", tier);
            assert!(DEPLOYMENT_SLOTS.evaluate(&r).is_none(), "{}", tier);
        }
    }

    #[test]
    fn configured_backup_and_slot_pass() {
        let mut r = on_tier(PlanTier::PremiumV3);
        r.operability.backups = vec![BackupConfig::default()];
        r.operability.deployment_slots = vec![DeploymentSlot {
            name: Some("staging".into()),
            state: None,
        }];
        assert!(BACKUP.evaluate(&r).is_none());
        assert!(DEPLOYMENT_SLOTS.evaluate(&r).is_none());
    }

    #[test]
    fn slots_finding_is_devops_low() {
        let f = DEPLOYMENT_SLOTS.evaluate(&on_tier(PlanTier::Standard)).unwrap();
        assert_eq!(f.category, Category::DevOps);
        assert_eq!(f.severity, Severity::Low);
    }
}
