//! Typed, normalized view of an App Service configuration snapshot.
//!
//! The collector document is parsed once by [`document`] into these records.
//! Every rule reads a `ResourceRecord`; none of them touch raw JSON. Fields
//! the collector omitted carry the defaults documented on each type.

mod document;
pub(crate) mod lenient;
pub mod network;
pub mod operability;
pub mod plan;
pub mod runtime;
pub mod transport;

use std::path::Path;

use crate::error::Result;

pub use network::{CustomDomain, IpRestriction, NetworkConfig, SslCertificate, VnetIntegration};
pub use operability::{BackupConfig, DeploymentSlot, DiagnosticLogs, Operability};
pub use plan::{HostingPlan, PlanTier};
pub use runtime::{CorsConfig, RuntimeSettings};
pub use transport::TransportSecurity;

/// Point-in-time collection of app service configurations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub subscription: Option<String>,
    pub subscription_id: Option<String>,
    /// When the collector captured the snapshot, as written by the collector.
    pub assessment_date: Option<String>,
    /// Resources in collection order.
    pub resources: Vec<ResourceRecord>,
}

impl Snapshot {
    /// Parse a collector document.
    ///
    /// Only syntactically invalid JSON, or a top level that is not an object,
    /// is an error. Everything below the top level degrades to defaults.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if !value.is_object() {
            return Err(<serde_json::Error as serde::de::Error>::custom(
                "snapshot document must be a JSON object",
            )
            .into());
        }
        let doc: document::SnapshotDocument = serde_json::from_value(value)?;
        Ok(doc.into_snapshot())
    }

    /// Read and parse a collector document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            resources = snapshot.resources.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Resource group of the first resource with this name.
    pub fn resource_group_of(&self, name: &str) -> Option<&str> {
        self.resources
            .iter()
            .find(|r| r.name == name)
            .and_then(|r| r.resource_group.as_deref())
    }
}

/// One hosted application's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    /// Site name; "Unknown" when the collector omitted it.
    pub name: String,
    pub resource_group: Option<String>,
    pub subscription: Option<String>,
    pub transport: TransportSecurity,
    pub identity: IdentityConfig,
    pub runtime: RuntimeSettings,
    pub plan: HostingPlan,
    pub network: NetworkConfig,
    pub operability: Operability,
}

impl Default for ResourceRecord {
    fn default() -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            resource_group: None,
            subscription: None,
            transport: TransportSecurity::default(),
            identity: IdentityConfig::default(),
            runtime: RuntimeSettings::default(),
            plan: HostingPlan::default(),
            network: NetworkConfig::default(),
            operability: Operability::default(),
        }
    }
}

pub(crate) const UNKNOWN_NAME: &str = "Unknown";

/// Managed identity and built-in authentication settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityConfig {
    /// "SystemAssigned", "UserAssigned", "SystemAssigned, UserAssigned" or "None".
    pub identity_type: Option<String>,
    pub auth_enabled: bool,
    pub unauthenticated_action: Option<String>,
}

impl IdentityConfig {
    pub fn has_managed_identity(&self) -> bool {
        match self.identity_type.as_deref().map(str::trim) {
            None | Some("") | Some("None") => false,
            Some(_) => true,
        }
    }
}
