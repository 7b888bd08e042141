//! Network isolation rules.

use crate::rules::{Category, Rule, Severity};

/// APPSVC-015: VNet integration
pub(super) const VNET_INTEGRATION: Rule = Rule {
    id: "APPSVC-015",
    name: "VNet Integration",
    title: "VNet integration not configured",
    severity: Severity::Low,
    category: Category::Security,
    recommendation: "Consider VNet integration for secure access to backend resources: az webapp vnet-integration add",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/overview-vnet-integration"),
    command: None,
    check: |r| {
        r.network.vnet_integrations.is_empty().then_some(
            "App Service is not integrated with a Virtual Network, limiting network isolation options."
                .into(),
        )
    },
};

/// APPSVC-016: Main site IP restrictions
///
/// The platform reports an implicit `Allow Any` entry when nothing is
/// configured; that entry does not count as a restriction.
pub(super) const IP_RESTRICTIONS: Rule = Rule {
    id: "APPSVC-016",
    name: "IP Restrictions",
    title: "No IP restrictions configured",
    severity: Severity::Medium,
    category: Category::Security,
    recommendation: "Configure IP restrictions to limit access: az webapp config access-restriction add",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/app-service-ip-restrictions"),
    command: None,
    check: |r| {
        r.network
            .effective_restrictions()
            .next()
            .is_none()
            .then_some("App Service is accessible from any IP address on the internet.".into())
    },
};

/// APPSVC-017: SCM site IP restrictions
pub(super) const SCM_IP_RESTRICTIONS: Rule = Rule {
    id: "APPSVC-017",
    name: "SCM IP Restrictions",
    title: "No SCM IP restrictions configured",
    severity: Severity::Medium,
    category: Category::Security,
    recommendation: "Configure SCM IP restrictions or use main site restrictions: az webapp config access-restriction add --scm-site true",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/app-service-ip-restrictions"),
    command: Some(
        "az webapp config access-restriction set --resource-group {rg} --name {app} --use-same-restrictions-for-scm-site true",
    ),
    check: |r| {
        let net = &r.network;
        (net.effective_scm_restrictions().next().is_none() && !net.scm_uses_main)
            .then_some("Kudu/SCM site is accessible from any IP address.".into())
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{IpRestriction, NetworkConfig, ResourceRecord, VnetIntegration};

    fn rule(action: &str, ip: &str) -> IpRestriction {
        IpRestriction {
            action: Some(action.into()),
            ip_address: Some(ip.into()),
            ..Default::default()
        }
    }

    fn with_network(network: NetworkConfig) -> ResourceRecord {
        ResourceRecord {
            network,
            ..Default::default()
        }
    }

    #[test]
    fn no_vnet_fires_low() {
        let f = VNET_INTEGRATION.evaluate(&ResourceRecord::default()).unwrap();
        assert_eq!(f.severity, Severity::Low);
        let r = with_network(NetworkConfig {
            vnet_integrations: vec![VnetIntegration::default()],
            ..Default::default()
        });
        assert!(VNET_INTEGRATION.evaluate(&r).is_none());
    }

    #[test]
    fn only_default_allow_counts_as_unrestricted() {
        let r = with_network(NetworkConfig {
            ip_restrictions: vec![rule("Allow", "Any")],
            scm_ip_restrictions: vec![rule("Allow", "Any")],
            ..Default::default()
        });
        assert!(IP_RESTRICTIONS.evaluate(&r).is_some());
        assert!(SCM_IP_RESTRICTIONS.evaluate(&r).is_some());
    }

    #[test]
    fn main_and_scm_are_independent() {
        let r = with_network(NetworkConfig {
            ip_restrictions: vec![rule("Allow", "10.0.0.0/8")],
            ..Default::default()
        });
        assert!(IP_RESTRICTIONS.evaluate(&r).is_none());
        assert!(SCM_IP_RESTRICTIONS.evaluate(&r).is_some());
    }

    #[test]
    fn scm_inheriting_main_rules_passes() {
        let r = with_network(NetworkConfig {
            scm_uses_main: true,
            ..Default::default()
        });
        assert!(IP_RESTRICTIONS.evaluate(&r).is_some());
        assert!(SCM_IP_RESTRICTIONS.evaluate(&r).is_none());
    }

    #[test]
    fn scm_deny_rule_passes() {
        let r = with_network(NetworkConfig {
            scm_ip_restrictions: vec![rule("Deny", "0.0.0.0/0")],
            ..Default::default()
        });
        assert!(SCM_IP_RESTRICTIONS.evaluate(&r).is_none());
    }
}
