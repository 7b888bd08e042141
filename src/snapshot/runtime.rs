/// Process and runtime settings of a site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub always_on: bool,
    pub remote_debugging: bool,
    pub auto_heal: bool,
    /// Path probed by the platform health check, e.g. "/health".
    pub health_check_path: Option<String>,
    /// `None` when the site has no CORS configuration at all, which is not
    /// the same as a configuration with no allowed origins.
    pub cors: Option<CorsConfig>,
    /// Runtime stack string such as "NODE|18-lts" or "DOTNETCORE|8.0".
    pub fx_version: Option<String>,
}

impl RuntimeSettings {
    pub fn has_health_check(&self) -> bool {
        self.health_check_path
            .as_deref()
            .is_some_and(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}
