//! Wire shape of the collector's snapshot document.
//!
//! The collector stores some site settings in two places (`tlsConfig` and
//! `runtimeConfig`). Normalization collapses each concern into one canonical
//! field: booleans are set if either location sets them, strings take the
//! first non-empty value, `tlsConfig` first. The minimum TLS version is only
//! ever read from `tlsConfig`.

use serde::Deserialize;

use super::lenient;
use super::network::{CustomDomain, IpRestriction, NetworkConfig, SslCertificate, VnetIntegration};
use super::operability::{BackupConfig, DeploymentSlot, DiagnosticLogs, Operability};
use super::plan::{HostingPlan, PlanTier};
use super::runtime::{CorsConfig, RuntimeSettings};
use super::transport::TransportSecurity;
use super::{IdentityConfig, ResourceRecord, Snapshot, UNKNOWN_NAME};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SnapshotDocument {
    #[serde(default, deserialize_with = "lenient::text")]
    subscription: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    subscription_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    assessment_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    app_services: Vec<AppServiceDocument>,
}

impl SnapshotDocument {
    pub(super) fn into_snapshot(self) -> Snapshot {
        let subscription = self.subscription;
        let resources = self
            .app_services
            .into_iter()
            .map(|app| app.into_record(subscription.as_deref()))
            .collect();
        Snapshot {
            subscription,
            subscription_id: self.subscription_id,
            assessment_date: self.assessment_date,
            resources,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppServiceDocument {
    #[serde(default, deserialize_with = "lenient::text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    resource_group: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    tls_config: TlsSettings,
    #[serde(default, deserialize_with = "lenient::or_default")]
    runtime_config: SiteSettings,
    #[serde(default, deserialize_with = "lenient::or_default")]
    config: SiteProperties,
    #[serde(default, deserialize_with = "lenient::or_default")]
    identity: IdentityDocument,
    #[serde(default, deserialize_with = "lenient::or_default")]
    app_service_plan: PlanDocument,
    #[serde(default, deserialize_with = "lenient::or_default")]
    diagnostic_logs: DiagnosticLogsDocument,
    #[serde(default, deserialize_with = "lenient::list")]
    backup_config: Vec<BackupConfig>,
    #[serde(default, deserialize_with = "lenient::list")]
    deployment_slots: Vec<DeploymentSlot>,
    #[serde(default, deserialize_with = "lenient::list")]
    vnet_integration: Vec<VnetIntegration>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    ip_restrictions: IpRestrictionsDocument,
    #[serde(default, deserialize_with = "lenient::or_default")]
    auth_config: AuthDocument,
    #[serde(default, deserialize_with = "lenient::list")]
    custom_domains: Vec<CustomDomain>,
    #[serde(default, deserialize_with = "lenient::list")]
    ssl_certificates: Vec<SslCertificate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TlsSettings {
    #[serde(default, deserialize_with = "lenient::text")]
    min_tls_version: Option<String>,
    #[serde(flatten)]
    site: SiteSettings,
}

/// Settings found under either `tlsConfig` or `runtimeConfig`. The fields
/// that only exist under `runtimeConfig` are simply absent from `tlsConfig`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteSettings {
    #[serde(default, deserialize_with = "lenient::or_default")]
    always_on: bool,
    #[serde(default, deserialize_with = "lenient::or_default")]
    remote_debugging_enabled: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    ftps_state: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    http20_enabled: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    linux_fx_version: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    windows_fx_version: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    health_check_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    auto_heal_enabled: bool,
    #[serde(default, deserialize_with = "lenient::or_default")]
    cors: Option<CorsDocument>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CorsDocument {
    #[serde(default, deserialize_with = "lenient::list")]
    allowed_origins: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteProperties {
    #[serde(default, deserialize_with = "lenient::or_default")]
    https_only: bool,
    #[serde(default, deserialize_with = "lenient::or_default")]
    client_cert_enabled: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    client_cert_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    linux_fx_version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct IdentityDocument {
    #[serde(default, rename = "type", deserialize_with = "lenient::text")]
    identity_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanDocument {
    #[serde(default, deserialize_with = "lenient::or_default")]
    sku: SkuDocument,
    #[serde(default, deserialize_with = "lenient::or_default")]
    zone_redundant: bool,
}

#[derive(Debug, Default, Deserialize)]
struct SkuDocument {
    #[serde(default, deserialize_with = "lenient::text")]
    tier: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    capacity: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiagnosticLogsDocument {
    #[serde(default, deserialize_with = "lenient::or_default")]
    application_logs_configuration: ApplicationLogSinks,
    #[serde(default, deserialize_with = "lenient::or_default")]
    http_logs_configuration: HttpLogSinks,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationLogSinks {
    #[serde(default, deserialize_with = "lenient::or_default")]
    file_system: LevelSink,
    #[serde(default, deserialize_with = "lenient::or_default")]
    azure_blob_storage: LevelSink,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HttpLogSinks {
    #[serde(default, deserialize_with = "lenient::or_default")]
    file_system: EnabledSink,
    #[serde(default, deserialize_with = "lenient::or_default")]
    azure_blob_storage: EnabledSink,
}

#[derive(Debug, Default, Deserialize)]
struct LevelSink {
    #[serde(default, deserialize_with = "lenient::text")]
    level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct EnabledSink {
    #[serde(default, deserialize_with = "lenient::or_default")]
    enabled: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpRestrictionsDocument {
    #[serde(default, deserialize_with = "lenient::list")]
    ip_security_restrictions: Vec<IpRestriction>,
    #[serde(default, deserialize_with = "lenient::list")]
    scm_ip_security_restrictions: Vec<IpRestriction>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    scm_ip_security_restrictions_use_main: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthDocument {
    #[serde(default, deserialize_with = "lenient::or_default")]
    enabled: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    unauthenticated_client_action: Option<String>,
}

impl AppServiceDocument {
    fn into_record(self, subscription: Option<&str>) -> ResourceRecord {
        let min_tls_version = self.tls_config.min_tls_version.filter(|v| !v.is_empty());
        let tls = self.tls_config.site;
        let rt = self.runtime_config;

        let fx_version = first_non_empty([
            self.config.linux_fx_version,
            rt.linux_fx_version,
            rt.windows_fx_version,
        ]);

        let transport = TransportSecurity {
            min_tls_version,
            https_only: self.config.https_only,
            ftps_state: first_non_empty([tls.ftps_state, rt.ftps_state]),
            client_cert_enabled: self.config.client_cert_enabled,
            client_cert_mode: self.config.client_cert_mode,
            http2_enabled: tls.http20_enabled || rt.http20_enabled,
        };

        let runtime = RuntimeSettings {
            always_on: tls.always_on || rt.always_on,
            remote_debugging: tls.remote_debugging_enabled || rt.remote_debugging_enabled,
            auto_heal: rt.auto_heal_enabled,
            health_check_path: rt.health_check_path,
            cors: rt.cors.map(|c| CorsConfig {
                allowed_origins: c.allowed_origins,
            }),
            fx_version,
        };

        let sku = self.app_service_plan.sku;
        let plan = HostingPlan {
            tier: sku
                .tier
                .as_deref()
                .map(PlanTier::parse)
                .unwrap_or_default(),
            capacity: sku.capacity.unwrap_or(1),
            zone_redundant: self.app_service_plan.zone_redundant,
        };

        let app_logs = self.diagnostic_logs.application_logs_configuration;
        let http_logs = self.diagnostic_logs.http_logs_configuration;
        let operability = Operability {
            logs: DiagnosticLogs {
                application_file_system_level: app_logs.file_system.level,
                application_blob_level: app_logs.azure_blob_storage.level,
                http_file_system_enabled: http_logs.file_system.enabled,
                http_blob_enabled: http_logs.azure_blob_storage.enabled,
            },
            backups: self.backup_config,
            deployment_slots: self.deployment_slots,
        };

        let network = NetworkConfig {
            vnet_integrations: self.vnet_integration,
            ip_restrictions: self.ip_restrictions.ip_security_restrictions,
            scm_ip_restrictions: self.ip_restrictions.scm_ip_security_restrictions,
            scm_uses_main: self.ip_restrictions.scm_ip_security_restrictions_use_main,
            custom_domains: self.custom_domains,
            ssl_certificates: self.ssl_certificates,
        };

        ResourceRecord {
            name: self.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            resource_group: self.resource_group,
            subscription: subscription.map(str::to_string),
            transport,
            identity: IdentityConfig {
                identity_type: self.identity.identity_type,
                auth_enabled: self.auth_config.enabled,
                unauthenticated_action: self.auth_config.unauthenticated_client_action,
            },
            runtime,
            plan,
            network,
            operability,
        }
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().find(|s| !s.is_empty())
}
