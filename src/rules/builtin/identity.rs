use crate::rules::{Category, Rule, Severity};

/// APPSVC-003: Managed identity
pub(super) const MANAGED_IDENTITY: Rule = Rule {
    id: "APPSVC-003",
    name: "Managed Identity",
    title: "Managed Identity not enabled",
    severity: Severity::Medium,
    category: Category::Security,
    recommendation: "Enable System-Assigned Managed Identity using: az webapp identity assign",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/overview-managed-identity"),
    command: Some("az webapp identity assign --resource-group {rg} --name {app}"),
    check: |r| {
        (!r.identity.has_managed_identity()).then_some(
            "Not using Managed Identity increases risk of credential exposure in code or configuration."
                .into(),
        )
    },
};

/// APPSVC-018: Built-in authentication
///
/// Low severity: plenty of apps authenticate in code or sit behind a gateway.
pub(super) const AUTHENTICATION: Rule = Rule {
    id: "APPSVC-018",
    name: "Authentication",
    title: "App Service Authentication not enabled",
    severity: Severity::Low,
    category: Category::Security,
    recommendation: "If the app requires authentication, enable App Service Authentication: az webapp auth update --enabled true",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/overview-authentication-authorization"),
    command: None,
    check: |r| {
        (!r.identity.auth_enabled).then_some(
            "Easy Auth/EasyAuth is not configured. Consider if authentication is needed.".into(),
        )
    },
};
