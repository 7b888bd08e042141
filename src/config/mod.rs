use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AssessError, Result};
use crate::rules::policy::Policy;
use crate::rules::rule_by_id;

/// Top-level configuration from `.appassess.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub policy: Policy,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Every rule id named by the policy must exist in the catalog.
    pub fn validate(&self) -> Result<()> {
        let named = self
            .policy
            .ignore_rules
            .iter()
            .chain(self.policy.overrides.keys());
        for id in named {
            if rule_by_id(id).is_none() {
                return Err(AssessError::Config(format!("unknown rule id '{}'", id)));
            }
        }
        Ok(())
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# appassess configuration
# Run `appassess list-rules` for the rule ids.

[policy]
# Minimum severity that makes `appassess analyze` exit non-zero
# (low, medium, high, critical).
fail_on = "high"

# Rule IDs to ignore entirely.
# ignore_rules = ["APPSVC-015"]

# Per-rule severity overrides.
# [policy.overrides]
# "APPSVC-018" = "medium"
"#
    }
}
