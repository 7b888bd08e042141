use serde::Deserialize;

use super::lenient;

/// Logging, backup and release settings of a site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operability {
    pub logs: DiagnosticLogs,
    pub backups: Vec<BackupConfig>,
    pub deployment_slots: Vec<DeploymentSlot>,
}

/// Diagnostic log sinks. Application logs are on when a sink's level is
/// anything but "Off"; HTTP logs carry a plain enabled flag per sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticLogs {
    pub application_file_system_level: Option<String>,
    pub application_blob_level: Option<String>,
    pub http_file_system_enabled: bool,
    pub http_blob_enabled: bool,
}

impl DiagnosticLogs {
    pub fn application_logging_enabled(&self) -> bool {
        [&self.application_file_system_level, &self.application_blob_level]
            .into_iter()
            .any(|level| level.as_deref().unwrap_or("Off") != "Off")
    }

    pub fn http_logging_enabled(&self) -> bool {
        self.http_file_system_enabled || self.http_blob_enabled
    }

    pub fn any_enabled(&self) -> bool {
        self.application_logging_enabled() || self.http_logging_enabled()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupConfig {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub storage_account_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSlot {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub state: Option<String>,
}
