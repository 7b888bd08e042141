//! TLS, HTTPS, FTP and certificate rules.

use std::borrow::Cow;

use crate::rules::{Category, Rule, Severity};
use crate::snapshot::ResourceRecord;

/// Lowest TLS version considered acceptable. Compared as a string.
const MIN_TLS: &str = "1.2";

/// APPSVC-001: Minimum TLS version
pub(super) const MIN_TLS_VERSION: Rule = Rule {
    id: "APPSVC-001",
    name: "TLS Version",
    title: "Minimum TLS version not set to 1.2 or higher",
    severity: Severity::Critical,
    category: Category::Security,
    recommendation: "Set minimum TLS version to 1.2 or higher using: az webapp config set --min-tls-version 1.2",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/configure-ssl-bindings#enforce-tls-versions"),
    command: Some("az webapp config set --resource-group {rg} --name {app} --min-tls-version 1.2"),
    check: check_min_tls_version,
};

fn check_min_tls_version(r: &ResourceRecord) -> Option<Cow<'static, str>> {
    let version = r
        .transport
        .min_tls_version
        .as_deref()
        .filter(|v| !v.is_empty());
    match version {
        Some(v) if v >= MIN_TLS => None,
        _ => Some(
            format!(
                "Current TLS version: {}. TLS 1.0 and 1.1 are deprecated and insecure.",
                version.unwrap_or("Not set")
            )
            .into(),
        ),
    }
}

/// APPSVC-002: HTTPS only
pub(super) const HTTPS_ONLY: Rule = Rule {
    id: "APPSVC-002",
    name: "HTTPS Only",
    title: "HTTPS Only not enforced",
    severity: Severity::High,
    category: Category::Security,
    recommendation: "Enable HTTPS Only using: az webapp update --https-only true",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/configure-ssl-bindings#enforce-https"),
    command: Some("az webapp update --resource-group {rg} --name {app} --https-only true"),
    check: |r| {
        (!r.transport.https_only).then_some(
            "App Service is accessible over HTTP, exposing data to man-in-the-middle attacks.".into(),
        )
    },
};

/// APPSVC-006: FTP allowed
pub(super) const FTPS_STATE: Rule = Rule {
    id: "APPSVC-006",
    name: "FTPS State",
    title: "FTP is allowed (not secure)",
    severity: Severity::Medium,
    category: Category::Security,
    recommendation: "Set FTPS to FtpsOnly or Disabled: az webapp config set --ftps-state FtpsOnly",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/deploy-ftp"),
    command: Some("az webapp config set --resource-group {rg} --name {app} --ftps-state FtpsOnly"),
    check: |r| {
        r.transport
            .allows_plain_ftp()
            .then_some("Plain FTP is insecure. Only FTPS should be allowed.".into())
    },
};

/// APPSVC-007: HTTP/2
pub(super) const HTTP2: Rule = Rule {
    id: "APPSVC-007",
    name: "HTTP/2",
    title: "HTTP/2 not enabled",
    severity: Severity::Low,
    category: Category::Performance,
    recommendation: "Enable HTTP/2 using: az webapp config set --http20-enabled true",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/configure-common#configure-general-settings"),
    command: Some("az webapp config set --resource-group {rg} --name {app} --http20-enabled true"),
    check: |r| {
        (!r.transport.http2_enabled).then_some(
            "HTTP/2 provides better performance with multiplexing and header compression.".into(),
        )
    },
};

/// APPSVC-008: Optional client certificates
///
/// Only an enabled-but-optional setup is reported; no client certificates
/// at all is a legitimate choice.
pub(super) const CLIENT_CERT_MODE: Rule = Rule {
    id: "APPSVC-008",
    name: "Client Certificate Mode",
    title: "Client certificates set to Optional",
    severity: Severity::Low,
    category: Category::Security,
    recommendation: "Consider setting to Required if mutual TLS authentication is needed: az webapp update --client-cert-mode Required",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/app-service-web-configure-tls-mutual-auth"),
    command: Some("az webapp update --resource-group {rg} --name {app} --client-cert-mode Required"),
    check: |r| {
        let t = &r.transport;
        (t.client_cert_enabled && t.client_cert_mode.as_deref() == Some("Optional"))
            .then_some("Client certificates are enabled but set to optional mode.".into())
    },
};

/// APPSVC-019: Custom domain without certificate
pub(super) const CUSTOM_DOMAIN_SSL: Rule = Rule {
    id: "APPSVC-019",
    name: "Custom Domain SSL",
    title: "Custom domain without SSL certificate",
    severity: Severity::Medium,
    category: Category::Security,
    recommendation: "Add SSL certificates for custom domains: az webapp config ssl upload",
    reference: Some("https://learn.microsoft.com/en-us/azure/app-service/configure-ssl-certificate"),
    command: None,
    check: |r| {
        let net = &r.network;
        (net.custom_host_names().next().is_some() && net.ssl_certificates.is_empty())
            .then_some("Custom domain(s) configured but no SSL certificates found.".into())
    },
};
