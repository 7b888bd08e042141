use serde::Deserialize;

use super::lenient;

/// Network isolation and exposure of a site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkConfig {
    pub vnet_integrations: Vec<VnetIntegration>,
    /// Access restrictions on the main site.
    pub ip_restrictions: Vec<IpRestriction>,
    /// Access restrictions on the SCM (Kudu) site.
    pub scm_ip_restrictions: Vec<IpRestriction>,
    /// The SCM site inherits the main site's restrictions.
    pub scm_uses_main: bool,
    pub custom_domains: Vec<CustomDomain>,
    pub ssl_certificates: Vec<SslCertificate>,
}

impl NetworkConfig {
    /// Main-site restrictions other than the platform's implicit allow-all.
    pub fn effective_restrictions(&self) -> impl Iterator<Item = &IpRestriction> {
        self.ip_restrictions.iter().filter(|r| !r.is_default_allow())
    }

    /// SCM-site restrictions other than the platform's implicit allow-all.
    pub fn effective_scm_restrictions(&self) -> impl Iterator<Item = &IpRestriction> {
        self.scm_ip_restrictions
            .iter()
            .filter(|r| !r.is_default_allow())
    }

    /// Bound host names that are not the platform-assigned default.
    pub fn custom_host_names(&self) -> impl Iterator<Item = &CustomDomain> {
        self.custom_domains.iter().filter(|d| !d.is_default_host())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VnetIntegration {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub vnet_resource_id: Option<String>,
}

/// One access restriction entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpRestriction {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    /// "Allow" or "Deny".
    #[serde(default, deserialize_with = "lenient::text")]
    pub action: Option<String>,
    /// CIDR, service tag, or "Any".
    #[serde(default, deserialize_with = "lenient::text")]
    pub ip_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub priority: Option<i64>,
}

impl IpRestriction {
    /// The implicit `Allow Any` entry the platform reports when nothing is set.
    pub fn is_default_allow(&self) -> bool {
        self.action.as_deref() == Some("Allow") && self.ip_address.as_deref() == Some("Any")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDomain {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub host_name: String,
}

impl CustomDomain {
    pub fn is_default_host(&self) -> bool {
        self.host_name.ends_with(".azurewebsites.net")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslCertificate {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub thumbprint: Option<String>,
}
