/// Transport-level security settings of a site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportSecurity {
    /// Minimum accepted TLS version, e.g. "1.2". Unset means the platform
    /// default, which is treated as below the recommended minimum.
    pub min_tls_version: Option<String>,
    /// Redirect plain HTTP to HTTPS.
    pub https_only: bool,
    /// FTP deployment mode: "AllAllowed", "FtpsOnly" or "Disabled".
    pub ftps_state: Option<String>,
    pub client_cert_enabled: bool,
    /// "Required", "Optional" or "OptionalInteractiveUser".
    pub client_cert_mode: Option<String>,
    pub http2_enabled: bool,
}

impl TransportSecurity {
    /// The configured FTP mode equals `AllAllowed`, ignoring case.
    pub fn allows_plain_ftp(&self) -> bool {
        self.ftps_state
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("allallowed"))
    }
}
