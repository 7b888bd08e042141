//! appassess: best-practice assessment for Azure App Service configuration
//! snapshots.
//!
//! Offline and deterministic. Loads a collector snapshot, runs the 23-rule
//! catalog over every app service, and renders the findings as JSON, HTML,
//! plain text or Markdown remediation documents.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use appassess::{assess, AssessOptions};
//!
//! let options = AssessOptions::default();
//! let report = assess(Path::new("app-services.json"), &options).unwrap();
//! println!(
//!     "Pass: {}, Findings: {}",
//!     report.verdict.pass,
//!     report.findings.total_findings()
//! );
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod rules;
pub mod snapshot;

use std::path::{Path, PathBuf};

use config::Config;
use error::Result;
use output::OutputFormat;
use rules::policy::PolicyVerdict;
use rules::{FindingCollection, RuleEngine};
use snapshot::Snapshot;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = ".appassess.toml";

/// Options for an assessment run.
#[derive(Debug, Clone, Default)]
pub struct AssessOptions {
    /// Path to config file (defaults to `.appassess.toml` in the working
    /// directory).
    pub config_path: Option<PathBuf>,
    /// CLI override for the fail_on threshold.
    pub fail_on_override: Option<rules::Severity>,
}

/// Complete assessment report.
#[derive(Debug)]
pub struct AssessReport {
    pub snapshot: Snapshot,
    /// Every finding the catalog produced, at catalog severity.
    pub findings: FindingCollection,
    /// Pass/fail after the policy's ignore list and overrides.
    pub verdict: PolicyVerdict,
}

/// Run a complete assessment: load config and snapshot, evaluate the
/// catalog, judge the findings against the policy.
pub fn assess(path: &Path, options: &AssessOptions) -> Result<AssessReport> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut config = Config::load(&config_path)?;

    if let Some(fail_on) = options.fail_on_override {
        config.policy.fail_on = fail_on;
    }

    let snapshot = Snapshot::load(path)?;
    Ok(assess_snapshot(snapshot, &config))
}

/// Evaluate an already loaded snapshot under `config`. The policy only
/// feeds the verdict; the findings are returned as the engine produced them.
pub fn assess_snapshot(snapshot: Snapshot, config: &Config) -> AssessReport {
    let findings = RuleEngine::new().evaluate(&snapshot);
    let verdict = config.policy.evaluate(findings.findings());
    tracing::debug!(
        total = verdict.total_findings,
        effective = verdict.effective_findings,
        pass = verdict.pass,
        "assessment complete"
    );

    AssessReport {
        snapshot,
        findings,
        verdict,
    }
}

/// Render an assessment report in the specified format.
pub fn render_report(report: &AssessReport, format: OutputFormat) -> Result<String> {
    output::render(&report.findings, format)
}


#[cfg(test)]
mod proptests {
    use chrono::TimeZone;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    use crate::rules::{RuleEngine, Severity};
    use crate::snapshot::Snapshot;

    fn tier() -> impl Strategy<Value = Option<&'static str>> {
        prop::option::of(prop::sample::select(vec![
            "Free", "Shared", "Basic", "Standard", "Premium", "PremiumV2", "PremiumV3",
        ]))
    }

    fn tls_version() -> impl Strategy<Value = Option<&'static str>> {
        prop::option::of(prop::sample::select(vec!["1.0", "1.1", "1.2", "1.3", ""]))
    }

    fn app() -> impl Strategy<Value = Value> {
        (
            (tier(), 0u32..5, any::<bool>()),
            (tls_version(), any::<bool>(), any::<bool>(), any::<bool>()),
            (any::<bool>(), any::<bool>(), any::<bool>()),
            prop::option::of(prop::collection::vec(
                prop::sample::select(vec!["*", "https://a.com", "https://b.com"]),
                0..3,
            )),
        )
            .prop_map(
                |((tier, capacity, zone), (tls, https, always_on, debug), (http2, heal, auth), cors)| {
                    let mut runtime = json!({
                        "alwaysOn": always_on,
                        "remoteDebuggingEnabled": debug,
                        "http20Enabled": http2,
                        "autoHealEnabled": heal,
                    });
                    if let Some(origins) = cors {
                        runtime["cors"] = json!({ "allowedOrigins": origins });
                    }
                    json!({
                        "name": "app",
                        "tlsConfig": { "minTlsVersion": tls },
                        "config": { "httpsOnly": https },
                        "runtimeConfig": runtime,
                        "appServicePlan": {
                            "sku": { "tier": tier, "capacity": capacity },
                            "zoneRedundant": zone,
                        },
                        "authConfig": { "enabled": auth },
                    })
                },
            )
    }

    const RUNTIMES: &[(&str, bool)] = &[
        ("NODE|18-lts", false),
        ("node|12-lts", true),
        ("PYTHON|3.11", false),
        ("PYTHON|3.7", true),
        ("DOTNETCORE|2.1", true),
        ("DOTNETCORE|8.0", false),
        ("JAVA|17-java17", false),
    ];

    type Rules = Vec<(&'static str, &'static str)>;

    /// Every setting a rule looks at, with the expected outcome derived
    /// directly from the values rather than from the typed record.
    #[derive(Debug, Clone)]
    struct Site {
        tier: Option<&'static str>,
        capacity: i64,
        capacity_as_float: bool,
        zone_redundant: bool,
        tls: Option<&'static str>,
        https_only: bool,
        identity: Option<&'static str>,
        always_on: bool,
        remote_debugging: bool,
        ftps: Option<&'static str>,
        http2: bool,
        client_cert_mode: Option<&'static str>,
        app_log_level: Option<&'static str>,
        http_logs: bool,
        backups: usize,
        slots: usize,
        vnets: usize,
        ip_rules: Rules,
        scm_rules: Rules,
        scm_uses_main: bool,
        auth: bool,
        host_names: Vec<&'static str>,
        certificates: usize,
        runtime: Option<(&'static str, bool)>,
        health_check: Option<&'static str>,
        auto_heal: bool,
        cors: Option<Vec<&'static str>>,
    }

    fn restrictions() -> impl Strategy<Value = Rules> {
        prop::collection::vec(
            prop::sample::select(vec![
                ("Allow", "Any"),
                ("Deny", "Any"),
                ("Allow", "10.0.0.0/8"),
            ]),
            0..3,
        )
    }

    fn restriction_json(rules: &[(&str, &str)]) -> Vec<Value> {
        rules
            .iter()
            .map(|(action, ip)| json!({ "action": action, "ipAddress": ip }))
            .collect()
    }

    fn unrestricted(rules: &[(&str, &str)]) -> bool {
        rules.iter().all(|&rule| rule == ("Allow", "Any"))
    }

    fn site() -> impl Strategy<Value = Site> {
        (
            (tier(), -1i64..4, any::<bool>(), any::<bool>()),
            (
                tls_version(),
                any::<bool>(),
                prop::option::of(prop::sample::select(vec![
                    "", "None", "SystemAssigned", "UserAssigned",
                ])),
                any::<bool>(),
            ),
            (
                any::<bool>(),
                prop::option::of(prop::sample::select(vec!["AllAllowed", "FtpsOnly", "Disabled"])),
                any::<bool>(),
                prop::option::of(prop::sample::select(vec!["Optional", "Required"])),
            ),
            (
                prop::option::of(prop::sample::select(vec!["Off", "Error", "Information"])),
                any::<bool>(),
                0usize..2,
                0usize..2,
            ),
            (0usize..2, restrictions(), restrictions(), any::<bool>()),
            (
                any::<bool>(),
                prop::collection::vec(
                    prop::sample::select(vec!["shop.azurewebsites.net", "shop.example.com"]),
                    0..3,
                ),
                0usize..2,
                prop::option::of(prop::sample::select(RUNTIMES.to_vec())),
            ),
            (
                prop::option::of(prop::sample::select(vec!["", "/health"])),
                any::<bool>(),
                prop::option::of(prop::collection::vec(
                    prop::sample::select(vec!["*", "https://a.com"]),
                    0..3,
                )),
            ),
        )
            .prop_map(
                |(
                    (tier, capacity, capacity_as_float, zone_redundant),
                    (tls, https_only, identity, always_on),
                    (remote_debugging, ftps, http2, client_cert_mode),
                    (app_log_level, http_logs, backups, slots),
                    (vnets, ip_rules, scm_rules, scm_uses_main),
                    (auth, host_names, certificates, runtime),
                    (health_check, auto_heal, cors),
                )| Site {
                    tier,
                    capacity,
                    capacity_as_float,
                    zone_redundant,
                    tls,
                    https_only,
                    identity,
                    always_on,
                    remote_debugging,
                    ftps,
                    http2,
                    client_cert_mode,
                    app_log_level,
                    http_logs,
                    backups,
                    slots,
                    vnets,
                    ip_rules,
                    scm_rules,
                    scm_uses_main,
                    auth,
                    host_names,
                    certificates,
                    runtime,
                    health_check,
                    auto_heal,
                    cors,
                },
            )
    }

    impl Site {
        fn to_json(&self) -> Value {
            let capacity = if self.capacity_as_float {
                json!(self.capacity as f64)
            } else {
                json!(self.capacity)
            };
            let mut runtime = json!({
                "alwaysOn": self.always_on,
                "http20Enabled": self.http2,
                "linuxFxVersion": self.runtime.map(|(fx, _)| fx),
                "healthCheckPath": self.health_check,
                "autoHealEnabled": self.auto_heal,
            });
            if let Some(origins) = &self.cors {
                runtime["cors"] = json!({ "allowedOrigins": origins });
            }
            let backups = vec![json!({ "name": "nightly" }); self.backups];
            let slots = vec![json!({ "name": "staging" }); self.slots];
            let vnets = vec![json!({ "name": "vnet-main" }); self.vnets];
            let certificates = vec![json!({ "thumbprint": "AB12" }); self.certificates];
            let domains: Vec<Value> = self
                .host_names
                .iter()
                .map(|host| json!({ "hostName": host }))
                .collect();

            json!({
                "name": "site",
                "resourceGroup": "rg-site",
                "tlsConfig": {
                    "minTlsVersion": self.tls,
                    "remoteDebuggingEnabled": self.remote_debugging,
                    "ftpsState": self.ftps,
                },
                "config": {
                    "httpsOnly": self.https_only,
                    "clientCertEnabled": self.client_cert_mode.is_some(),
                    "clientCertMode": self.client_cert_mode,
                },
                "identity": { "type": self.identity },
                "runtimeConfig": runtime,
                "appServicePlan": {
                    "sku": { "tier": self.tier, "capacity": capacity },
                    "zoneRedundant": self.zone_redundant,
                },
                "diagnosticLogs": {
                    "applicationLogsConfiguration": { "fileSystem": { "level": self.app_log_level } },
                    "httpLogsConfiguration": { "fileSystem": { "enabled": self.http_logs } },
                },
                "backupConfig": backups,
                "deploymentSlots": slots,
                "vnetIntegration": vnets,
                "ipRestrictions": {
                    "ipSecurityRestrictions": restriction_json(&self.ip_rules),
                    "scmIpSecurityRestrictions": restriction_json(&self.scm_rules),
                    "scmIpSecurityRestrictionsUseMain": self.scm_uses_main,
                },
                "authConfig": { "enabled": self.auth },
                "customDomains": domains,
                "sslCertificates": certificates,
            })
        }

        fn expected_rule_ids(&self) -> Vec<&'static str> {
            let tier = self.tier.unwrap_or("");
            let free_or_shared = matches!(tier, "Free" | "Shared");
            let standard_or_premium =
                matches!(tier, "Standard" | "Premium" | "PremiumV2" | "PremiumV3");
            let dedicated = tier == "Basic" || standard_or_premium;

            let conditions = [
                ("APPSVC-001", !matches!(self.tls, Some("1.2" | "1.3"))),
                ("APPSVC-002", !self.https_only),
                ("APPSVC-003", matches!(self.identity, None | Some("" | "None"))),
                ("APPSVC-004", dedicated && !self.always_on),
                ("APPSVC-005", self.remote_debugging),
                ("APPSVC-006", self.ftps == Some("AllAllowed")),
                ("APPSVC-007", !self.http2),
                ("APPSVC-008", self.client_cert_mode == Some("Optional")),
                (
                    "APPSVC-009",
                    !matches!(self.app_log_level, Some("Error" | "Information")) && !self.http_logs,
                ),
                ("APPSVC-010", standard_or_premium && self.backups == 0),
                ("APPSVC-011", standard_or_premium && self.slots == 0),
                ("APPSVC-012", free_or_shared),
                ("APPSVC-013", dedicated && self.capacity == 1),
                (
                    "APPSVC-014",
                    matches!(tier, "PremiumV2" | "PremiumV3") && !self.zone_redundant,
                ),
                ("APPSVC-015", self.vnets == 0),
                ("APPSVC-016", unrestricted(&self.ip_rules)),
                ("APPSVC-017", unrestricted(&self.scm_rules) && !self.scm_uses_main),
                ("APPSVC-018", !self.auth),
                (
                    "APPSVC-019",
                    self.host_names.contains(&"shop.example.com") && self.certificates == 0,
                ),
                ("APPSVC-020", self.runtime.is_some_and(|(_, deprecated)| deprecated)),
                (
                    "APPSVC-021",
                    dedicated && self.capacity > 1 && self.health_check != Some("/health"),
                ),
                ("APPSVC-022", !self.auto_heal),
                (
                    "APPSVC-023",
                    self.cors.as_ref().is_some_and(|origins| origins.contains(&"*")),
                ),
            ];
            conditions
                .into_iter()
                .filter(|&(_, fires)| fires)
                .map(|(id, _)| id)
                .collect()
        }
    }

    fn snapshot(apps: Vec<Value>) -> Snapshot {
        Snapshot::from_json(&json!({ "appServices": apps }).to_string()).unwrap()
    }

    proptest! {
        #[test]
        fn tally_always_matches_findings(apps in prop::collection::vec(app(), 0..6)) {
            let collection = RuleEngine::new().evaluate(&snapshot(apps));
            let tally = collection.tally();
            prop_assert_eq!(tally.total(), collection.total_findings());
            prop_assert_eq!(collection.total_findings(), collection.findings().len());
        }

        #[test]
        fn tls_rule_fires_once_when_below_minimum(app in app()) {
            let tls = app["tlsConfig"]["minTlsVersion"].as_str().map(str::to_string);
            let collection = RuleEngine::new().evaluate(&snapshot(vec![app]));
            let tls_findings: Vec<_> = collection
                .findings()
                .iter()
                .filter(|f| f.rule_id == "APPSVC-001")
                .collect();
            let below = match tls.as_deref() {
                None | Some("") => true,
                Some(v) => v < "1.2",
            };
            prop_assert_eq!(tls_findings.len(), usize::from(below));
            if below {
                prop_assert_eq!(tls_findings[0].severity, Severity::Critical);
            }
        }

        #[test]
        fn evaluation_is_repeatable(apps in prop::collection::vec(app(), 0..4)) {
            let snap = snapshot(apps);
            let at = chrono::Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
            let engine = RuleEngine::new();
            prop_assert_eq!(engine.evaluate_at(&snap, at), engine.evaluate_at(&snap, at));
        }

        #[test]
        fn free_tier_gates_out_dedicated_rules(app in app()) {
            let mut app = app;
            app["appServicePlan"]["sku"]["tier"] = json!("Free");
            let collection = RuleEngine::new().evaluate(&snapshot(vec![app]));
            let ids: Vec<&str> = collection.findings().iter().map(|f| f.rule_id.as_str()).collect();
            prop_assert!(ids.contains(&"APPSVC-012"));
            for gated in ["APPSVC-004", "APPSVC-010", "APPSVC-011", "APPSVC-013", "APPSVC-021"] {
                prop_assert!(!ids.contains(&gated));
            }
        }

        #[test]
        fn findings_match_independently_derived_fire_conditions(site in site()) {
            let collection = RuleEngine::new().evaluate(&snapshot(vec![site.to_json()]));
            let ids: Vec<&str> = collection.findings().iter().map(|f| f.rule_id.as_str()).collect();
            let expected = site.expected_rule_ids();
            prop_assert_eq!(collection.total_findings(), expected.len());
            prop_assert_eq!(ids, expected);
        }
    }
}
