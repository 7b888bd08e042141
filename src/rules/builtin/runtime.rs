//! Runtime behavior rules: warm-up, debugging, runtime stack, self-healing
//! and CORS.

use std::borrow::Cow;

use crate::rules::{Category, Rule, Severity};
use crate::snapshot::ResourceRecord;

/// Runtime stacks past or near end of support, in match order.
const DEPRECATED_RUNTIMES: &[&str] = &[
    "NODE|10",
    "NODE|12",
    "NODE|14",
    "DOTNETCORE|2",
    "DOTNETCORE|3.0",
    "PYTHON|2",
    "PYTHON|3.6",
    "PYTHON|3.7",
    "PHP|7.0",
    "PHP|7.1",
    "PHP|7.2",
    "PHP|7.3",
    "JAVA|8",
];

/// APPSVC-004: Always On
pub(super) const ALWAYS_ON: Rule = Rule {
    id: "APPSVC-004",
    name: "Always On",
    title: "Always On is not enabled",
    severity: Severity::Medium,
    category: Category::Performance,
    recommendation: "Enable Always On using: az webapp config set --always-on true",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/configure-common#configure-general-settings"),
    command: Some("az webapp config set --resource-group {rg} --name {app} --always-on true"),
    check: |r| {
        (r.plan.tier.is_dedicated() && !r.runtime.always_on).then_some(
            "App may experience cold starts and increased latency after idle periods.".into(),
        )
    },
};

/// APPSVC-005: Remote debugging
pub(super) const REMOTE_DEBUGGING: Rule = Rule {
    id: "APPSVC-005",
    name: "Remote Debugging",
    title: "Remote debugging is enabled",
    severity: Severity::High,
    category: Category::Security,
    recommendation: "Disable remote debugging using: az webapp config set --remote-debugging-enabled false",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/configure-common#configure-general-settings"),
    command: Some(
        "az webapp config set --resource-group {rg} --name {app} --remote-debugging-enabled false",
    ),
    check: |r| {
        r.runtime.remote_debugging.then_some(
            "Remote debugging should only be enabled temporarily and poses a security risk in production."
                .into(),
        )
    },
};

/// APPSVC-020: Deprecated runtime stack
pub(super) const RUNTIME_VERSION: Rule = Rule {
    id: "APPSVC-020",
    name: "Runtime Version",
    title: "Using deprecated or outdated runtime version",
    severity: Severity::High,
    category: Category::Security,
    recommendation: "Update to a supported runtime version: az webapp config set --linux-fx-version or --windows-fx-version",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/overview-patch-os-runtime"),
    command: None,
    check: check_runtime_version,
};

fn check_runtime_version(r: &ResourceRecord) -> Option<Cow<'static, str>> {
    let fx = r.runtime.fx_version.as_deref()?;
    deprecated_pattern(fx)?;
    Some(
        format!(
            "Runtime version '{}' may be deprecated or lack security updates.",
            fx
        )
        .into(),
    )
}

/// First deprecated pattern the runtime string contains, ignoring case.
fn deprecated_pattern(fx_version: &str) -> Option<&'static str> {
    let fx = fx_version.to_lowercase();
    DEPRECATED_RUNTIMES
        .iter()
        .copied()
        .find(|pattern| fx.contains(&pattern.to_lowercase()))
}

/// APPSVC-021: Health check on scaled-out plans
pub(super) const HEALTH_CHECK: Rule = Rule {
    id: "APPSVC-021",
    name: "Health Check",
    title: "Health check not configured",
    severity: Severity::Medium,
    category: Category::Reliability,
    recommendation: "Configure health check path: az webapp config set --health-check-path /health",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/monitor-instances-health-check"),
    command: Some(
        "az webapp config set --resource-group {rg} --name {app} --generic-configurations '{\"healthCheckPath\": \"/health\"}'",
    ),
    check: |r| {
        (r.plan.tier.is_dedicated() && r.plan.capacity > 1 && !r.runtime.has_health_check())
            .then_some("No health check endpoint configured for multi-instance deployment.".into())
    },
};

/// APPSVC-022: Auto-heal
pub(super) const AUTO_HEAL: Rule = Rule {
    id: "APPSVC-022",
    name: "Auto-Heal",
    title: "Auto-heal not configured",
    severity: Severity::Low,
    category: Category::Reliability,
    recommendation: "Consider enabling auto-heal with appropriate triggers and actions",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/overview-diagnostics#auto-healing"),
    command: None,
    check: |r| {
        (!r.runtime.auto_heal)
            .then_some("Auto-heal can automatically recover from common failure scenarios.".into())
    },
};

/// APPSVC-023: CORS wildcard
pub(super) const CORS_WILDCARD: Rule = Rule {
    id: "APPSVC-023",
    name: "CORS Wildcard",
    title: "CORS configured with wildcard (*)",
    severity: Severity::Medium,
    category: Category::Security,
    recommendation: "Restrict CORS to specific origins: az webapp cors remove --allowed-origins * && az webapp cors add --allowed-origins https://example.com",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/app-service-web-tutorial-rest-api"),
    command: Some("az webapp cors remove --resource-group {rg} --name {app} --allowed-origins '*'"),
    check: |r| {
        r.runtime
            .cors
            .as_ref()
            .is_some_and(|c| c.allows_any_origin())
            .then_some(
                "CORS is configured to allow all origins, which may expose the API to unauthorized access."
                    .into(),
            )
    },
};
