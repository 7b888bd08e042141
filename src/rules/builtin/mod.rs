mod identity;
mod network;
mod operability;
mod plan;
mod runtime;
mod transport;

use super::Rule;

/// The built-in catalog, in evaluation order.
pub static CATALOG: [Rule; 23] = [
    transport::MIN_TLS_VERSION,
    transport::HTTPS_ONLY,
    identity::MANAGED_IDENTITY,
    runtime::ALWAYS_ON,
    runtime::REMOTE_DEBUGGING,
    transport::FTPS_STATE,
    transport::HTTP2,
    transport::CLIENT_CERT_MODE,
    operability::DIAGNOSTIC_LOGS,
    operability::BACKUP,
    operability::DEPLOYMENT_SLOTS,
    plan::PLAN_TIER,
    plan::SINGLE_INSTANCE,
    plan::ZONE_REDUNDANCY,
    network::VNET_INTEGRATION,
    network::IP_RESTRICTIONS,
    network::SCM_IP_RESTRICTIONS,
    identity::AUTHENTICATION,
    transport::CUSTOM_DOMAIN_SSL,
    runtime::RUNTIME_VERSION,
    runtime::HEALTH_CHECK,
    runtime::AUTO_HEAL,
    runtime::CORS_WILDCARD,
];
